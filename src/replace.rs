use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::metadata::Metadata;
use crate::utils::{self, Result};

const SKIP_DIRS: [&str; 5] = ["node_modules", ".git", ".output", "dist", ".nuxt"];

const SKIP_EXTENSIONS: [&str; 11] = [
    "png", "jpg", "jpeg", "gif", "webp", "ico", "woff", "woff2", "ttf", "pdf", "zip",
];

fn is_control_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIP_DIRS.contains(&name))
            .unwrap_or(false)
}

fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SKIP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Rewrites every placeholder token under `root` in place and returns the
/// number of files that changed. Files that are not valid UTF-8 text are
/// skipped silently; unchanged files are never written back.
pub fn replace_placeholders(root: impl AsRef<Path>, metadata: &Metadata) -> Result<usize> {
    let replacements = metadata.replacements();
    let mut changed = 0;

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_control_dir(entry));
    for entry in walker {
        let entry = entry.map_err(|err| err.into_io_error().unwrap())?;
        if !entry.file_type().is_file() || has_binary_extension(entry.path()) {
            continue;
        }

        let buf = fs::read(entry.path())?;
        if utils::is_binary_buf(&buf) {
            continue;
        }
        let Ok(content) = String::from_utf8(buf) else {
            continue;
        };

        let mut output = content.clone();
        for (token, value) in &replacements {
            output = output.replace(*token, value);
        }

        if output != content {
            fs::write(entry.path(), output)?;
            changed += 1;
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn sample_metadata() -> Metadata {
        Metadata::new(
            "my-app",
            "Example",
            "example.com",
            "The Example Page",
            "",
            "hello@example.com",
            "+46 7182387123",
        )
    }

    fn scaffold(root: &Path) {
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(
            root.join("package.json"),
            r#"{"name": "{{PROJECT_SLUG}}", "description": "{{DESCRIPTION}}"}"#,
        )
        .unwrap();
        fs::write(
            root.join("src/app.vue"),
            "<title>{{TITLE}}</title> contact {{EMAIL}}",
        )
        .unwrap();
        fs::write(root.join("src/plain.txt"), "no tokens here").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "module {{PROJECT_NAME}}").unwrap();
        fs::write(root.join("logo.png"), b"{{PROJECT_NAME}}\x00binary").unwrap();
        fs::write(root.join("notes.pdf"), "{{PROJECT_NAME}} as text").unwrap();
    }

    #[test]
    fn substitutes_tokens_and_reports_changed_files() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path());

        let changed = replace_placeholders(dir.path(), &sample_metadata()).unwrap();
        assert_eq!(changed, 2);

        let package = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert_eq!(package, r#"{"name": "my-app", "description": ""}"#);

        let app = fs::read_to_string(dir.path().join("src/app.vue")).unwrap();
        assert_eq!(app, "<title>The Example Page</title> contact hello@example.com");
    }

    #[test]
    fn second_pass_changes_nothing() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path());

        replace_placeholders(dir.path(), &sample_metadata()).unwrap();
        let changed = replace_placeholders(dir.path(), &sample_metadata()).unwrap();
        assert_eq!(changed, 0);
    }

    #[test]
    fn never_touches_control_dirs_or_binary_extensions() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path());

        replace_placeholders(dir.path(), &sample_metadata()).unwrap();

        let vendored = fs::read_to_string(dir.path().join("node_modules/pkg/index.js")).unwrap();
        assert_eq!(vendored, "module {{PROJECT_NAME}}");

        let image = fs::read(dir.path().join("logo.png")).unwrap();
        assert_eq!(image, b"{{PROJECT_NAME}}\x00binary");

        // skipped by extension alone, the content is readable text
        let pdf = fs::read_to_string(dir.path().join("notes.pdf")).unwrap();
        assert_eq!(pdf, "{{PROJECT_NAME}} as text");
    }

    #[test]
    fn skips_non_utf8_files_silently() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.bin"), [0xff, 0xfe, 0x01]).unwrap();

        let changed = replace_placeholders(dir.path(), &sample_metadata()).unwrap();
        assert_eq!(changed, 0);
        assert_eq!(fs::read(dir.path().join("data.bin")).unwrap(), [0xff, 0xfe, 0x01]);
    }
}
