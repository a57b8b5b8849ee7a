use std::io::{self, Write};

use console::style;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{cursor, execute};

pub(crate) struct Choice<T> {
    pub(crate) label: String,
    pub(crate) value: T,
}

impl<T> Choice<T> {
    pub(crate) fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Default)]
pub(crate) struct Options<'a> {
    pub(crate) required: bool,
    pub(crate) validate: Option<Box<dyn Fn(&str) -> Option<String> + 'a>>,
}

impl<'a> Options<'a> {
    pub(crate) fn required() -> Self {
        Self {
            required: true,
            validate: None,
        }
    }

    pub(crate) fn validated(validate: impl Fn(&str) -> Option<String> + 'a) -> Self {
        Self {
            required: true,
            validate: Some(Box::new(validate)),
        }
    }
}

/// Blocking line prompt. Empty input resolves to `default`; required and
/// validation failures re-issue the prompt and never escape as errors.
pub(crate) fn input(label: &str, default: &str, opts: Options) -> String {
    loop {
        if default.is_empty() {
            print!("{}: ", style(label).bold());
        } else {
            print!("{} ({}): ", style(label).bold(), style(default).dim());
        }
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            line.clear();
        }
        let entered = line.trim();
        let value = if entered.is_empty() { default } else { entered };

        if opts.required && value.trim().is_empty() {
            println!("This value is required.");
            continue;
        }
        if let Some(validate) = &opts.validate {
            if let Some(message) = validate(value) {
                println!("{message}");
                continue;
            }
        }
        return value.to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Up,
    Down,
    Enter,
    Interrupt,
    Other,
}

fn decode(event: &Event) -> Option<Key> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };
    if *kind != KeyEventKind::Press {
        return None;
    }
    Some(match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        _ => Key::Other,
    })
}

/// Cursor position over the choice list. Movement clamps at both ends, no
/// wraparound.
#[derive(Debug, Clone, Copy)]
struct SelectionState {
    len: usize,
    cursor: usize,
}

impl SelectionState {
    fn new(len: usize) -> Self {
        Self { len, cursor: 0 }
    }

    fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn down(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
    }
}

// Raw mode is held only for the lifetime of one select() call and restored
// on every exit path, interrupt included.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn render<T>(choices: &[Choice<T>], state: &SelectionState, repaint: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if repaint {
        // repaint only the list's own lines, never scroll
        execute!(
            stdout,
            cursor::MoveUp(choices.len() as u16),
            Clear(ClearType::FromCursorDown)
        )?;
    }
    for (i, choice) in choices.iter().enumerate() {
        if i == state.cursor {
            write!(stdout, "> {}\r\n", style(&choice.label).cyan())?;
        } else {
            write!(stdout, "  {}\r\n", choice.label)?;
        }
    }
    stdout.flush()
}

/// Raw-mode single selection: up/down move the highlight, Enter commits,
/// Ctrl+C restores the terminal and terminates the process.
pub(crate) fn select<T: Clone>(label: &str, choices: &[Choice<T>]) -> io::Result<T> {
    assert!(!choices.is_empty(), "choices should not be empty");

    println!("{}", style(label).bold());
    println!("{}", style("Use ↑ ↓ and Enter").cyan());

    let mut state = SelectionState::new(choices.len());
    render(choices, &state, false)?;

    let guard = RawModeGuard::acquire()?;
    loop {
        match decode(&event::read()?) {
            Some(Key::Up) => {
                state.up();
                render(choices, &state, true)?;
            }
            Some(Key::Down) => {
                state.down();
                render(choices, &state, true)?;
            }
            Some(Key::Enter) => break,
            Some(Key::Interrupt) => {
                drop(guard);
                println!();
                std::process::exit(130);
            }
            _ => {}
        }
    }
    drop(guard);

    println!();
    Ok(choices[state.cursor].value.clone())
}

pub(crate) fn confirm(label: &str, default_yes: bool) -> io::Result<bool> {
    let choices = if default_yes {
        [Choice::new("Yes", true), Choice::new("No", false)]
    } else {
        [Choice::new("No", false), Choice::new("Yes", true)]
    };
    select(label, &choices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_clamps_at_the_last_index() {
        let mut state = SelectionState::new(3);
        state.down();
        state.down();
        state.down();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn cursor_clamps_at_zero() {
        let mut state = SelectionState::new(3);
        state.up();
        assert_eq!(state.cursor, 0);
        state.down();
        state.up();
        state.up();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn single_item_never_moves() {
        let mut state = SelectionState::new(1);
        state.down();
        state.up();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn decodes_navigation_keys() {
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(decode(&key(KeyCode::Up)), Some(Key::Up));
        assert_eq!(decode(&key(KeyCode::Down)), Some(Key::Down));
        assert_eq!(decode(&key(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(decode(&key(KeyCode::Char('x'))), Some(Key::Other));
    }

    #[test]
    fn decodes_interrupt() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(decode(&event), Some(Key::Interrupt));
    }

    #[test]
    fn ignores_key_release_events() {
        let mut event = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(decode(&Event::Key(event)), None);
    }
}
