use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::utils::Result;

#[derive(Debug, Clone, Copy)]
pub struct IconSpec {
    pub path: &'static str,
    pub width: u32,
    pub height: u32,
}

// Destination paths are relative to the template's public assets root.
pub const ICONS: [IconSpec; 12] = [
    IconSpec { path: "android-chrome-512x512.png", width: 512, height: 512 },
    IconSpec { path: "favicon.ico", width: 32, height: 32 },
    IconSpec { path: "img/brand/pwa-72x72.png", width: 72, height: 72 },
    IconSpec { path: "img/brand/pwa-96x96.png", width: 96, height: 96 },
    IconSpec { path: "img/brand/pwa-120x120.png", width: 120, height: 120 },
    IconSpec { path: "img/brand/pwa-152x152.png", width: 152, height: 152 },
    IconSpec { path: "img/brand/pwa-167x167.png", width: 167, height: 167 },
    IconSpec { path: "img/brand/pwa-180x180.png", width: 180, height: 180 },
    IconSpec { path: "img/brand/pwa-192x192.png", width: 192, height: 192 },
    IconSpec { path: "img/brand/pwa-384x384.webp", width: 384, height: 384 },
    IconSpec { path: "img/brand/pwa-512x512.png", width: 512, height: 512 },
    IconSpec { path: "img/brand/maskable-icon-512x512.png", width: 512, height: 512 },
];

const GRAYSCALE_VARIANT: &str = "img/brand/logo-gray-512x512.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePolicy {
    /// Distort the source to the exact target dimensions.
    Stretch,
    /// Preserve aspect ratio, then pad to the exact target dimensions with a
    /// transparent background, centered.
    Fit,
}

pub fn filter_chain(policy: ScalePolicy, width: u32, height: u32, grayscale: bool) -> String {
    let mut chain = match policy {
        ScalePolicy::Stretch => format!("scale={width}:{height}"),
        ScalePolicy::Fit => format!(
            "scale=w={width}:h={height}:force_original_aspect_ratio=decrease,\
             pad={width}:{height}:(ow-iw)/2:(oh-ih)/2:color=0x00000000"
        ),
    };
    if grayscale {
        chain.push_str(",format=gray");
    }
    chain
}

pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Best-effort pixel dimension probe; `None` on any failure.
pub fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=s=x:p=0",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let (width, height) = text.trim().split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

/// Derives the full icon catalog from `logo` under `<dest>/public`. Per-entry
/// conversion failures are reported and do not abort the remaining entries.
pub fn process_logo(logo: &Path, dest: &Path, policy: ScalePolicy, grayscale: bool) -> Result<()> {
    if !ffmpeg_available() {
        println!(
            "{} ffmpeg not found, skipping icon conversion",
            style("warning:").yellow().bold()
        );
        return Ok(());
    }

    let public = dest.join("public");
    let total = ICONS.len() as u64 + u64::from(grayscale);
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} converting icons [{pos}/{len}] {msg}")
            .expect("progress template should be valid")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    bar.enable_steady_tick(Duration::from_millis(80));

    for icon in &ICONS {
        bar.set_message(icon.path);
        let chain = filter_chain(policy, icon.width, icon.height, false);
        convert(logo, &public.join(icon.path), &chain, &bar)?;
        bar.inc(1);
    }
    if grayscale {
        bar.set_message(GRAYSCALE_VARIANT);
        let chain = filter_chain(policy, 512, 512, true);
        convert(logo, &public.join(GRAYSCALE_VARIANT), &chain, &bar)?;
        bar.inc(1);
    }

    bar.finish_and_clear();
    println!(
        "{} icon set generated under {}",
        style("✓").green(),
        public.display()
    );
    Ok(())
}

fn convert(src: &Path, dst: &Path, chain: &str, bar: &ProgressBar) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    let status = Command::new("ffmpeg")
        .arg("-i")
        .arg(src)
        .arg("-vf")
        .arg(chain)
        .arg("-y")
        .arg(dst)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if !status.success() {
        bar.println(format!(
            "{} failed to convert {} (exit code {})",
            style("warning:").yellow().bold(),
            dst.display(),
            status.code().unwrap_or(-1)
        ));
    }
    Ok(())
}
