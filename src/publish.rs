use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use console::style;
use regex::Regex;

use crate::pipeline::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn flag(self) -> &'static str {
        match self {
            Self::Public => "--public",
            Self::Private => "--private",
        }
    }
}

/// Extracts `owner/repo` from an HTTPS or SSH GitHub remote. `None` means
/// the host is not one we can provision automatically.
pub fn github_repo_path(url: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^(?:https://github\.com/|git@github\.com:)([^/]+)/(.+?)(?:\.git)?/?$").unwrap()
    });
    let captures = pattern.captures(url)?;
    Some(format!("{}/{}", &captures[1], &captures[2]))
}

fn run_git(dest: &Path, args: &[&str]) -> Result<(), String> {
    let status = Command::new("git")
        .args(args)
        .current_dir(dest)
        .stdin(Stdio::null())
        .status()
        .map_err(|err| format!("failed to execute git: {err}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("git {} failed", args.join(" ")))
    }
}

fn gh_ok(args: &[&str], dest: &Path) -> bool {
    Command::new("gh")
        .args(args)
        .current_dir(dest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn push_remediation(url: &str) -> String {
    format!(
        "push to '{url}' failed; check that your token has the 'repo' scope \
         ('gh auth login', then 'gh auth setup-git'), or switch the remote to SSH \
         ('git remote set-url origin git@github.com:<owner>/<repo>.git') and push manually"
    )
}

/// Initializes local version control in `dest` and, when the remote is a
/// GitHub URL, creates/attaches the remote repository and pushes. Every
/// failure here downgrades to a warning; generation has already succeeded.
pub fn publish(dest: &Path, remote_url: &str, visibility: Visibility, branch: &str) -> Outcome {
    println!(
        "{}",
        style("Initializing git repository and publishing...").cyan()
    );

    let local: [&[&str]; 4] = [
        &["init"],
        &["add", "."],
        &["commit", "-m", "Initial commit from wrapgen"],
        &["branch", "-M", branch],
    ];
    for args in local {
        if let Err(message) = run_git(dest, args) {
            return Outcome::Warn(format!(
                "{message}; initialize and push the repository manually"
            ));
        }
    }

    let Some(repo) = github_repo_path(remote_url) else {
        return Outcome::Warn(format!(
            "automated publishing is not supported for '{remote_url}'; \
             add the remote and push manually"
        ));
    };

    if !gh_ok(&["--version"], dest) {
        return Outcome::Warn(String::from(
            "GitHub CLI ('gh') not found; install it or add the remote and push manually",
        ));
    }
    if !gh_ok(&["auth", "status"], dest) {
        return Outcome::Warn(String::from(
            "GitHub CLI is not authenticated; run 'gh auth login' and push manually \
             (the local repository is ready)",
        ));
    }

    if gh_ok(&["repo", "view", &repo], dest) {
        // repository already exists, attach and push separately
        if let Err(message) = run_git(dest, &["remote", "add", "origin", remote_url]) {
            return Outcome::Warn(message);
        }
        if run_git(dest, &["push", "-u", "origin", branch]).is_err() {
            return Outcome::Warn(push_remediation(remote_url));
        }
    } else {
        println!(
            "{}",
            style(format!("Creating GitHub repository: {repo}")).cyan()
        );
        let created = Command::new("gh")
            .args([
                "repo",
                "create",
                &repo,
                visibility.flag(),
                "--source=.",
                "--remote=origin",
                "--push",
            ])
            .current_dir(dest)
            .stdin(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        if !created {
            return Outcome::Warn(push_remediation(remote_url));
        }
    }

    println!(
        "{} repository initialized and pushed to {remote_url}",
        style("✓").green()
    );
    Outcome::Ok
}
