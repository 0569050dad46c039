//! Decides whether a notification scoped to a list of routes is visible on a page.
//!
//! A route is either an exact path (`/docs`) or a prefix ending in `*`
//! (`/docs*` or `/docs/*`), which matches the prefix itself and anything below it.
//! A single trailing `/` is ignored on both sides.

const WILDCARD: char = '*';

/// Strips one trailing `/`. Only one: `/docs//` becomes `/docs/`.
pub fn normalize(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

pub fn is_route_match(path: &str, route: &str) -> bool {
    let path = normalize(path);

    match route.strip_suffix(WILDCARD) {
        Some(prefix) => {
            let prefix = normalize(prefix);
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('/'))
        }
        None => path == normalize(route),
    }
}

/// An empty route list matches every page.
pub fn matches_any<S: AsRef<str>>(path: &str, routes: &[S]) -> bool {
    routes.is_empty() || routes.iter().any(|route| is_route_match(path, route.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_route() {
        assert!(is_route_match("/docs", "/docs"));
        assert!(is_route_match("/docs/", "/docs"));
        assert!(is_route_match("/docs", "/docs/"));
        assert!(!is_route_match("/docs/guide", "/docs"));
        assert!(!is_route_match("/doc", "/docs"));
    }

    #[test]
    fn wildcard_route() {
        assert!(is_route_match("/docs/guide", "/docs*"));
        assert!(is_route_match("/docs", "/docs*"));
        assert!(is_route_match("/docs/", "/docs/*"));
        assert!(is_route_match("/docs/a/b", "/docs/*"));
        assert!(!is_route_match("/other", "/docs*"));
        assert!(!is_route_match("/docsearch", "/docs*"));
    }

    #[test]
    fn root_wildcard_matches_everything_rooted() {
        assert!(is_route_match("/", "/*"));
        assert!(is_route_match("/pricing", "/*"));
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(normalize("/docs//"), "/docs/");
        assert_eq!(normalize("/docs/"), "/docs");
        assert_eq!(normalize("/docs"), "/docs");
        assert!(!is_route_match("/docs//", "/docs"));
        assert!(is_route_match("/docs//", "/docs/"));
    }

    #[test]
    fn root_route() {
        assert!(is_route_match("/", "/"));
        assert!(!is_route_match("/docs", "/"));
    }

    #[test]
    fn any_route_wins() {
        let routes = ["/pricing", "/docs*"];
        assert!(matches_any("/docs/guide", &routes));
        assert!(matches_any("/pricing/", &routes));
        assert!(!matches_any("/blog", &routes));
    }

    #[test]
    fn empty_routes_match() {
        let routes: [&str; 0] = [];
        assert!(matches_any("/anything", &routes));
        assert!(matches_any("", &routes));
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,6}"
    }

    fn path() -> impl Strategy<Value = String> {
        (prop::collection::vec(segment(), 0..4), 0..3usize).prop_map(|(segments, trailing)| {
            let mut path = format!("/{}", segments.join("/"));
            if !segments.is_empty() {
                path.push_str(&"/".repeat(trailing));
            }
            path
        })
    }

    proptest! {
        #[test]
        fn prop_empty_routes_accept_any_path(path in path()) {
            let routes: Vec<String> = Vec::new();
            prop_assert!(matches_any(&path, &routes));
        }

        #[test]
        fn prop_exact_match_is_normalized_equality(path in path(), route in path()) {
            prop_assert_eq!(is_route_match(&path, &route), normalize(&path) == normalize(&route));
        }

        #[test]
        fn prop_wildcard_matches_prefix_or_descendant(path in path(), base in path()) {
            let route = format!("{}*", base);
            let path_n = normalize(&path);
            let base_n = normalize(&base);
            let expected = path_n == base_n || path_n.starts_with(&format!("{}/", base_n));
            prop_assert_eq!(is_route_match(&path, &route), expected);
        }

        #[test]
        fn prop_normalized_path_is_left_alone(path in path()) {
            let once = normalize(&path);
            if !once.ends_with('/') {
                prop_assert_eq!(normalize(once), once);
            }
        }

        #[test]
        fn prop_normalize_strips_at_most_one_slash(path in path()) {
            let once = normalize(&path);
            prop_assert!(path.len() - once.len() <= 1);
            prop_assert!(path.starts_with(once));
        }

        #[test]
        fn prop_descendants_match_their_wildcard(base in path(), child in segment()) {
            let route = format!("{}*", base);
            let descendant = format!("{}/{}", normalize(&base), child);
            prop_assert!(is_route_match(&descendant, &route));
        }
    }
}
