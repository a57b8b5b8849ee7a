use console::style;

/// Result of one pipeline stage. `Warn` is reported and the pipeline keeps
/// going; `Fatal` aborts everything that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Warn(String),
    Fatal(String),
}

pub struct Stage<'a> {
    pub name: &'static str,
    run: Box<dyn FnOnce() -> Outcome + 'a>,
}

impl<'a> Stage<'a> {
    pub fn new(name: &'static str, run: impl FnOnce() -> Outcome + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

/// Drives the stage list in order. Returns the fatal diagnostic, if any;
/// stages after a fatal one never run.
pub fn run_stages(stages: Vec<Stage<'_>>) -> Result<(), String> {
    for stage in stages {
        match (stage.run)() {
            Outcome::Ok => {}
            Outcome::Warn(diagnostic) => {
                println!("{} {diagnostic}", style("warning:").yellow().bold());
            }
            Outcome::Fatal(diagnostic) => {
                return Err(format!("{}: {diagnostic}", stage.name));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn warn_continues_to_later_stages() {
        let ran: RefCell<Vec<&str>> = RefCell::new(Vec::new());
        let stages = vec![
            Stage::new("first", || {
                ran.borrow_mut().push("first");
                Outcome::Warn(String::from("tool missing"))
            }),
            Stage::new("second", || {
                ran.borrow_mut().push("second");
                Outcome::Ok
            }),
        ];
        assert!(run_stages(stages).is_ok());
        assert_eq!(*ran.borrow(), ["first", "second"]);
    }

    #[test]
    fn fatal_aborts_remaining_stages() {
        let ran: RefCell<Vec<&str>> = RefCell::new(Vec::new());
        let stages = vec![
            Stage::new("fetch", || {
                ran.borrow_mut().push("fetch");
                Outcome::Fatal(String::from("network down"))
            }),
            Stage::new("substitute", || {
                ran.borrow_mut().push("substitute");
                Outcome::Ok
            }),
        ];
        let err = run_stages(stages).unwrap_err();
        assert_eq!(err, "fetch: network down");
        assert_eq!(*ran.borrow(), ["fetch"]);
    }
}
