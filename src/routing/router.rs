//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route matching method and path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan (acceptable for a table of fixed, small size)

use axum::http::Method;

use crate::http::Chain;
use crate::routing::matcher::PathMatcher;

/// A (method, path pattern, handler chain) entry.
#[derive(Debug)]
pub struct Route {
    name: &'static str,
    method: Method,
    matcher: Box<dyn PathMatcher>,
    chain: Chain,
}

impl Route {
    pub fn new(
        name: &'static str,
        method: Method,
        matcher: impl PathMatcher + 'static,
        chain: Chain,
    ) -> Self {
        Self {
            name,
            method,
            matcher: Box::new(matcher),
            chain,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.matcher.matches(path)
    }
}

#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// First route, in declaration order, whose method and pattern match.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(method, path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::{Contains, SegmentSuffix};

    fn overlapping_table() -> RouteTable {
        RouteTable::new(vec![
            Route::new(
                "specific",
                Method::GET,
                SegmentSuffix::parse("/uploads/avatar.png"),
                Chain::default(),
            ),
            Route::new("broad", Method::GET, Contains::new("/uploads/"), Chain::default()),
            Route::new(
                "shadowed",
                Method::GET,
                SegmentSuffix::parse("/uploads/{digits}"),
                Chain::default(),
            ),
        ])
    }

    #[test]
    fn test_first_declared_match_wins() {
        let table = overlapping_table();
        let route = table.match_route(&Method::GET, "/uploads/avatar.png").unwrap();
        assert_eq!(route.name(), "specific");

        // Both "broad" and "shadowed" match; declaration order decides.
        let route = table.match_route(&Method::GET, "/uploads/42").unwrap();
        assert_eq!(route.name(), "broad");
    }

    #[test]
    fn test_method_mismatch_is_no_match() {
        let table = overlapping_table();
        assert!(table.match_route(&Method::POST, "/uploads/avatar.png").is_none());
        assert!(table.match_route(&Method::HEAD, "/uploads/42").is_none());
    }

    #[test]
    fn test_no_match() {
        let table = overlapping_table();
        assert!(table.match_route(&Method::GET, "/foo.git/nonsense").is_none());
        let empty = RouteTable::default();
        assert!(empty.is_empty());
        assert!(empty.match_route(&Method::GET, "/").is_none());
    }
}
