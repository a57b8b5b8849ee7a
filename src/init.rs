use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Result};
use console::style;

use wrapgen::metadata::{Metadata, Template, TEMPLATES};
use wrapgen::pipeline::{run_stages, Outcome, Stage};
use wrapgen::publish::{self, Visibility};
use wrapgen::{degit, replace, validate};

use crate::config::Config;
use crate::prompt::{self, Choice, Options};
use crate::{logo, ui};

pub(crate) fn run(config: &Config) -> Result<()> {
    println!();
    println!(
        "{}",
        style("Welcome to wrapgen! Let's build something awesome.")
            .cyan()
            .bold()
    );
    println!();

    let project_name = prompt::input(
        "Project name",
        "the-example-app",
        Options::validated(|value| {
            if validate::is_valid_project_name(value) {
                None
            } else {
                Some(
                    style("Use letters, numbers, dashes and underscores only.")
                        .red()
                        .to_string(),
                )
            }
        }),
    )
    .to_lowercase();

    let git_repo = prompt::input("Git repository URL (optional)", "", Options::default());
    let visibility = if git_repo.is_empty() {
        Visibility::Public
    } else {
        prompt::select(
            "Repository visibility",
            &[
                Choice::new("Public", Visibility::Public),
                Choice::new("Private", Visibility::Private),
            ],
        )?
    };

    let short_name = prompt::input("Short name (optional)", "Example", Options::default());
    let domain_name = prompt::input("Domain name (optional)", "example.com", Options::default());
    let title = prompt::input("Title (optional)", "The Example Page", Options::default());
    let description = prompt::input(
        "Description (optional)",
        "Find examples every day, anywhere, for example.",
        Options::default(),
    );
    let email = prompt::input(
        "Email contact (optional)",
        "hello@example.com",
        Options::default(),
    );
    let phone = prompt::input("Phone number (optional)", "+46 7182387123", Options::default());

    let metadata = Metadata::new(
        &project_name,
        &short_name,
        &domain_name,
        &title,
        &description,
        &email,
        &phone,
    );

    println!();

    let choices: Vec<Choice<Template>> = TEMPLATES
        .iter()
        .map(|template| Choice::new(template.label, template.clone()))
        .collect();
    let template = prompt::select("Select which template to use:", &choices)?;

    let Some(url) = template.url else {
        println!(
            "{}",
            style("That template is not available yet. Exiting.").yellow()
        );
        return Ok(());
    };

    let dest = env::current_dir()?.join(&metadata.project_name);
    if dest.exists() {
        ui::warn("choose a different project name or remove the existing folder");
        return Err(anyhow!(wrapgen::Error::DestinationExists(dest)));
    }

    let mut stages = vec![
        Stage::new("fetch template", || {
            let bar = ui::spinner("Generating repository...");
            match degit::fetch(url, &dest) {
                Ok(()) => {
                    ui::finish_spinner(&bar, true);
                    Outcome::Ok
                }
                Err(err) => {
                    ui::finish_spinner(&bar, false);
                    Outcome::Fatal(err.to_string())
                }
            }
        }),
        Stage::new("substitute placeholders", || {
            match replace::replace_placeholders(&dest, &metadata) {
                Ok(changed) => {
                    ui::info(format!("rewrote {changed} file(s) with project metadata"));
                    Outcome::Ok
                }
                Err(err) => Outcome::Fatal(err.to_string()),
            }
        }),
    ];
    if template.is_firebase() {
        stages.push(Stage::new("firebase init", || firebase_init(&dest)));
    }
    stages.push(Stage::new("logo generation", || {
        maybe_generate_logo(&dest, config)
    }));
    if !git_repo.is_empty() {
        stages.push(Stage::new("publishing", || {
            publish::publish(&dest, &git_repo, visibility, &config.default_branch)
        }));
    }

    run_stages(stages).map_err(|diagnostic| anyhow!(diagnostic))?;

    println!();
    println!(
        "{}",
        style(format!(
            "Project successfully generated in: {}",
            metadata.project_name
        ))
        .green()
        .bold()
    );
    println!("{}", style("Next steps:").green());
    ui::info(format!("  cd {}", metadata.project_name));
    ui::info("  yarn install");
    ui::info("  yarn dev");
    println!();
    Ok(())
}

fn maybe_generate_logo(dest: &Path, config: &Config) -> Outcome {
    match prompt::confirm("Generate a logo with AI?", false) {
        Ok(true) => logo::generate_interactive(dest, config),
        Ok(false) => Outcome::Ok,
        Err(err) => Outcome::Warn(err.to_string()),
    }
}

// `firebase init` is interactive; only stderr is captured for diagnosis.
fn firebase_init(dest: &Path) -> Outcome {
    ui::info("Running firebase init...");
    let output = Command::new("firebase")
        .arg("init")
        .current_dir(dest)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output();
    match output {
        Err(_) => Outcome::Warn(String::from(
            "could not run 'firebase init'; make sure you have firebase-tools installed",
        )),
        Ok(output) if output.status.success() => Outcome::Ok,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("firestore") {
                Outcome::Warn(String::from(
                    "Firestore is not yet enabled in your Firebase project; create it at \
                     https://console.firebase.google.com/project/_/firestore and re-run \
                     'firebase init'",
                ))
            } else {
                let detail = stderr.trim();
                if detail.is_empty() {
                    Outcome::Warn(String::from(
                        "firebase initialization was not completed successfully",
                    ))
                } else {
                    Outcome::Warn(format!(
                        "firebase initialization was not completed successfully: {detail}"
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn existing_destination_aborts_before_any_write() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("my-app");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("keep.txt"), "untouched").unwrap();

        let err = degit::fetch("https://github.com/acme/widget", &dest).unwrap_err();
        assert!(matches!(err, wrapgen::Error::DestinationExists(_)));
        assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "untouched");
    }
}
