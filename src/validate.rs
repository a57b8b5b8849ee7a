use std::sync::OnceLock;

use regex::Regex;

pub fn is_valid_project_name(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*$").unwrap());
    pattern.is_match(name.trim())
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_project_names() {
        assert!(is_valid_project_name("my-app"));
        assert!(is_valid_project_name("MyApp2"));
        assert!(is_valid_project_name("a"));
        assert!(is_valid_project_name("app_name-3"));
        assert!(is_valid_project_name("  padded  "));
    }

    #[test]
    fn rejects_invalid_project_names() {
        assert!(!is_valid_project_name(""));
        assert!(!is_valid_project_name("my app"));
        assert!(!is_valid_project_name("-leading-dash"));
        assert!(!is_valid_project_name("_leading_underscore"));
        assert!(!is_valid_project_name("name!"));
        assert!(!is_valid_project_name("émoji"));
    }

    #[test]
    fn slugify_collapses_runs_and_strips_edges() {
        assert_eq!(slugify("My App"), "my-app");
        assert_eq!(slugify("The  Example!!App"), "the-example-app");
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("Already-Good"), "already-good");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        for name in ["My App", "the-example-app", "A__B--C", "  Spaced Out  ", "x"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for '{name}'");
        }
    }
}
