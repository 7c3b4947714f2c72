//! Path matching logic.
//!
//! # Responsibilities
//! - Match a request path against a suffix-anchored segment pattern
//! - Match an unanchored path fragment
//!
//! # Design Decisions
//! - Path matching is case-sensitive, on the raw (undecoded) path
//! - Suffix patterns compare whole segments, so `/info/refs` never
//!   matches `/xinfo/refs`
//! - No regex to guarantee O(n) matching

use std::fmt;

/// Trait for matching request paths against conditions.
pub trait PathMatcher: Send + Sync + fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// One component of a [`SegmentSuffix`] pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact, case-sensitive text.
    Literal(String),
    /// Exactly `n` lowercase hexadecimal characters.
    Hex(usize),
    /// One or more ASCII digits.
    Digits,
}

impl Segment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(text) => segment == text,
            Segment::Hex(len) => {
                segment.len() == *len
                    && segment
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            }
            Segment::Digits => !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// Matches when the trailing segments of the path equal the pattern.
///
/// Built from a template such as `/gitlab-lfs/objects/{hex64}/{digits}`:
/// `{digits}` is a numeric segment, `{hexN}` a lowercase hex segment of
/// exactly `N` characters, anything else is literal.
#[derive(Debug, Clone)]
pub struct SegmentSuffix {
    segments: Vec<Segment>,
}

impl SegmentSuffix {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn parse(template: &str) -> Self {
        let segments = template
            .trim_start_matches('/')
            .split('/')
            .map(|part| {
                if part == "{digits}" {
                    return Segment::Digits;
                }
                part.strip_prefix("{hex")
                    .and_then(|rest| rest.strip_suffix('}'))
                    .and_then(|len| len.parse().ok())
                    .map(Segment::Hex)
                    .unwrap_or_else(|| Segment::Literal(part.to_string()))
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl PathMatcher for SegmentSuffix {
    fn matches(&self, path: &str) -> bool {
        // The first pattern segment must be preceded by a '/', so the path
        // needs at least one more component than the pattern.
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() <= self.segments.len() {
            return false;
        }
        let tail = &parts[parts.len() - self.segments.len()..];
        self.segments
            .iter()
            .zip(tail)
            .all(|(segment, part)| segment.matches(part))
    }
}

/// Matches when the fragment occurs anywhere in the path.
#[derive(Debug, Clone)]
pub struct Contains {
    fragment: String,
}

impl Contains {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl PathMatcher for Contains {
    fn matches(&self, path: &str) -> bool {
        path.contains(&self.fragment)
    }
}
