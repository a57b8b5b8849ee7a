use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::utils::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN
            .get_or_init(|| Regex::new(r"^https://github\.com/([^/]+)/([^/]+)(/.*)?$").unwrap());
        let Some(captures) = pattern.captures(s) else {
            return Err(Error::InvalidTemplateUrl(s.to_string()));
        };
        let owner = captures[1].to_string();
        let name = captures[2].trim_end_matches(".git").to_string();
        if name.is_empty() {
            return Err(Error::InvalidTemplateUrl(s.to_string()));
        }
        Ok(Self { owner, name })
    }
}

fn command_exists(name: &str) -> bool {
    Command::new(name)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

// bunx starts noticeably faster than npx; either runner produces the same
// snapshot.
fn runner() -> &'static [&'static str] {
    if command_exists("bun") {
        &["bunx"]
    } else {
        &["npx", "--yes"]
    }
}

pub fn fetch(url: &str, dest: &Path) -> Result<()> {
    let source = Source::from_str(url)?;
    if dest.exists() {
        return Err(Error::DestinationExists(dest.to_path_buf()));
    }
    let runner = runner();
    let output = Command::new(runner[0])
        .args(&runner[1..])
        .arg("degit")
        .arg(source.to_string())
        .arg(dest)
        .arg("--mode=tar")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|err| Error::Fetch(format!("failed to execute degit: {err}")))?;

    if !output.status.success() {
        let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::Fetch(diagnostic));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_plain_repository_url() {
        let source = Source::from_str("https://github.com/acme/widget").unwrap();
        assert_eq!(source.owner, "acme");
        assert_eq!(source.name, "widget");
        assert_eq!(source.to_string(), "acme/widget");
    }

    #[test]
    fn strips_archive_suffix_and_subpath() {
        let source = Source::from_str("https://github.com/acme/widget.git").unwrap();
        assert_eq!(source.to_string(), "acme/widget");

        let source = Source::from_str("https://github.com/acme/widget/tree/main/docs").unwrap();
        assert_eq!(source.to_string(), "acme/widget");
    }

    #[test]
    fn refuses_an_existing_destination_before_invoking_the_tool() {
        let dir = TempDir::new().unwrap();
        let err = fetch("https://github.com/acme/widget", dir.path()).unwrap_err();
        assert!(matches!(err, Error::DestinationExists(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn rejects_foreign_url_shapes() {
        for url in [
            "http://github.com/acme/widget",
            "https://gitlab.com/acme/widget",
            "git@github.com:acme/widget.git",
            "acme/widget",
            "https://github.com/acme",
            "https://github.com/acme/.git",
        ] {
            assert!(
                matches!(Source::from_str(url), Err(Error::InvalidTemplateUrl(_))),
                "accepted '{url}'"
            );
        }
    }
}
