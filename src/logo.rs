use std::path::Path;
use std::{env, fs};

use anyhow::Result;
use console::style;

use wrapgen::ai::Session;
use wrapgen::image;
use wrapgen::pipeline::Outcome;

use crate::config::Config;
use crate::prompt::{self, Options};
use crate::{pwa, ui};

pub(crate) fn run(config: &Config) -> Result<()> {
    println!();
    println!(
        "{}",
        style("Generate a new logo for your project!").cyan().bold()
    );
    println!();

    let dest = env::current_dir()?;
    if dest.join("public").join("logo.png").exists() {
        ui::warn("existing logo files found in /public");
        if !prompt::confirm("Do you want to overwrite them?", false)? {
            println!("Operation cancelled. No files were changed.");
            return Ok(());
        }
        println!();
    }

    match generate_interactive(&dest, config) {
        Outcome::Ok => {
            println!();
            ui::success(format!(
                "All done! Files updated in: {}",
                dest.join("public").display()
            ));
        }
        Outcome::Warn(diagnostic) | Outcome::Fatal(diagnostic) => {
            println!();
            println!("{} {diagnostic}", style("✗ Failed to generate logo.").red());
        }
    }
    Ok(())
}

/// Prompt-driven generation loop: generate, derive the icon set, then offer
/// a refinement turn; an empty refinement ends the loop.
pub(crate) fn generate_interactive(dest: &Path, config: &Config) -> Outcome {
    let mut instruction = prompt::input("Enter a prompt for your logo", "", Options::required());

    let api_key = match env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => match &config.gemini_api_key {
            Some(key) => key.clone(),
            None => prompt::input("Enter your Google Gemini API key", "", Options::required()),
        },
    };

    let mut session = match Session::new(api_key) {
        Ok(session) => session,
        Err(err) => return Outcome::Warn(err.to_string()),
    };

    loop {
        let bar = ui::spinner("Generating logo with AI...");
        let bytes = match session.request(&instruction) {
            Ok(bytes) => {
                ui::finish_spinner(&bar, true);
                bytes
            }
            Err(err) => {
                ui::finish_spinner(&bar, false);
                return Outcome::Warn(err.to_string());
            }
        };

        let public = dest.join("public");
        let logo_path = public.join("logo.png");
        let saved = fs::create_dir_all(&public).and_then(|()| fs::write(&logo_path, &bytes));
        if let Err(err) = saved {
            return Outcome::Warn(format!("failed to save logo: {err}"));
        }
        ui::info(format!("logo saved to {}", logo_path.display()));

        // every iteration ends with a complete icon set, not just a raw image
        if let Err(err) = derive_icons(&logo_path, dest) {
            return Outcome::Warn(err.to_string());
        }

        let refinement = prompt::input(
            "Refinement instruction (leave empty to finish)",
            "",
            Options::default(),
        );
        if refinement.trim().is_empty() {
            return Outcome::Ok;
        }
        instruction = refinement;
    }
}

fn derive_icons(logo_path: &Path, dest: &Path) -> Result<()> {
    let policy = pwa::choose_policy(logo_path)?;
    let grayscale = prompt::confirm("Also emit a 512x512 grayscale variant?", false)?;
    image::process_logo(logo_path, dest, policy, grayscale)?;
    Ok(())
}
