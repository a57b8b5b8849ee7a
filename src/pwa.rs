use std::env;
use std::io;
use std::path::Path;

use anyhow::Result;
use console::style;

use walkdir::{DirEntry, WalkDir};

use wrapgen::image::{self, ScalePolicy};

use crate::prompt::{self, Choice};
use crate::ui;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

const SKIP_DIRS: [&str; 6] = ["node_modules", ".git", ".output", "dist", ".nuxt", ".cache"];

fn is_control_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIP_DIRS.contains(&name))
            .unwrap_or(false)
}

fn find_images(root: &Path) -> Result<Vec<String>> {
    let mut images = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_control_dir(entry));
    for entry in walker {
        let entry = entry.map_err(|err| err.into_io_error().unwrap())?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !matches {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .expect("walked path should be under root");
        images.push(relative.display().to_string());
    }
    images.sort();
    Ok(images)
}

pub(crate) fn run() -> Result<()> {
    println!();
    println!(
        "{}",
        style("Generate PWA images from an existing image!")
            .cyan()
            .bold()
    );
    println!();

    let dest = env::current_dir()?;

    ui::info("Scanning for images...");
    let images = find_images(&dest)?;
    if images.is_empty() {
        println!("{}", style("No images found in this directory.").red());
        ui::warn("supported formats: .png, .jpg, .jpeg, .webp");
        return Ok(());
    }
    ui::info(format!("Found {} image(s).", images.len()));
    println!();

    let choices: Vec<Choice<String>> = images
        .into_iter()
        .map(|image| Choice::new(image.clone(), image))
        .collect();
    let selected = prompt::select("Select an image to use as source", &choices)?;
    let source = dest.join(&selected);
    ui::info(format!("Using: {selected}"));

    let policy = choose_policy(&source)?;
    let grayscale = prompt::confirm("Also emit a 512x512 grayscale variant?", false)?;
    image::process_logo(&source, &dest, policy, grayscale)?;

    println!();
    ui::success(format!(
        "All done! PWA images generated in: {}",
        dest.join("public").display()
    ));
    Ok(())
}

/// Non-square sources need an explicit scaling decision; square sources (and
/// unprobeable ones) scale directly.
pub(crate) fn choose_policy(source: &Path) -> io::Result<ScalePolicy> {
    if let Some((width, height)) = image::probe_dimensions(source) {
        if width != height {
            ui::warn(format!("source image is {width}x{height}, not square"));
            return prompt::select(
                "Scaling policy",
                &[
                    Choice::new(
                        "Fit (preserve aspect ratio, pad with transparency)",
                        ScalePolicy::Fit,
                    ),
                    Choice::new("Stretch (distort to exact size)", ScalePolicy::Stretch),
                ],
            );
        }
    }
    Ok(ScalePolicy::Stretch)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn finds_sources_outside_control_dirs_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join("logo.png"), "x").unwrap();
        fs::write(dir.path().join("assets/photo.JPG"), "x").unwrap();
        fs::write(dir.path().join("assets/readme.md"), "x").unwrap();
        fs::write(dir.path().join("node_modules/pkg/icon.png"), "x").unwrap();
        fs::write(dir.path().join(".cache/thumb.webp"), "x").unwrap();

        let images = find_images(dir.path()).unwrap();
        assert_eq!(images, ["assets/photo.JPG", "logo.png"]);
    }

    #[test]
    fn empty_tree_yields_no_images() {
        let dir = TempDir::new().unwrap();
        assert!(find_images(dir.path()).unwrap().is_empty());
    }
}
