use owo_colors::OwoColorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use vimstack::Selector;
use vimstack::errors::IntrospectionError;

/// Terminal counterpart of `inputlist()`.
///
/// Prints the candidates and reads a number; an empty line, Ctrl-C or EOF
/// cancel with `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(&self, candidates: &[String]) -> Result<i64, IntrospectionError> {
        let mut rl = DefaultEditor::new().map_err(to_introspection_error)?;

        eprintln!("{}", "Select error:".bright_blue().bold());
        for candidate in candidates {
            eprintln!("{candidate}");
        }

        loop {
            match rl.readline("Type number and <Enter> (empty cancels): ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        return Ok(0);
                    }
                    match trimmed.parse::<i64>() {
                        Ok(n) => return Ok(n),
                        Err(_) => eprintln!("{} {trimmed}", "not a number:".yellow()),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(0),
                Err(err) => return Err(to_introspection_error(err)),
            }
        }
    }
}

fn to_introspection_error(err: ReadlineError) -> IntrospectionError {
    IntrospectionError::failed("inputlist", err.to_string())
}
