use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// Hidden automatically on non-TTY output; carries no protocol state.
pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("spinner template should be valid")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

pub(crate) fn finish_spinner(bar: &ProgressBar, success: bool) {
    let message = bar.message();
    bar.finish_and_clear();
    if success {
        println!("{} {message}", style("✓").green());
    } else {
        println!("{} {message}", style("✗").red());
    }
}

pub(crate) fn info(message: impl AsRef<str>) {
    println!("{}", style(message.as_ref()).cyan());
}

pub(crate) fn success(message: impl AsRef<str>) {
    println!("{} {}", style("✓").green(), style(message.as_ref()).green());
}

pub(crate) fn warn(message: impl AsRef<str>) {
    println!(
        "{} {}",
        style("warning:").yellow().bold(),
        style(message.as_ref()).yellow()
    );
}
