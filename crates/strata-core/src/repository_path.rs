//! Canonical form of repository paths.
//!
//! Modules map resources to absolute paths in the shared resource repository.
//! Every path is normalized before it is claimed, so that `/app/`, `//app`
//! and `/app/views/..` all name the same resource.

/// Normalize a repository path.
///
/// The result always starts with `/`, never ends with `/` (except for the
/// root itself), contains no empty, `.` or `..` segments, and never escapes
/// the repository root.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Returns `true` if `path` is `base` itself or lies below it.
///
/// Both arguments are expected to be normalized.
pub fn is_base_path(base: &str, path: &str) -> bool {
    if base == "/" {
        return true;
    }
    path == base
        || path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_leading_slash() {
        assert_eq!(normalize("app"), "/app");
    }

    #[test]
    fn strips_trailing_and_duplicate_slashes() {
        assert_eq!(normalize("/app//views/"), "/app/views");
    }

    #[test]
    fn resolves_dot_segments() {
        assert_eq!(normalize("/app/./views/../config"), "/app/config");
    }

    #[test]
    fn never_escapes_root() {
        assert_eq!(normalize("/../../app"), "/app");
        assert_eq!(normalize(".."), "/");
    }

    #[test]
    fn root_stays_root() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
    }

    #[test]
    fn base_path_matches_segments_only() {
        assert!(is_base_path("/app", "/app"));
        assert!(is_base_path("/app", "/app/views"));
        assert!(!is_base_path("/app", "/application"));
        assert!(is_base_path("/", "/anything"));
    }
}
