use owo_colors::OwoColorize;
use vimstack::{ErrorRecord, Frame, Stacktrace};

/// One line per frame, innermost last, quickfix style.
pub fn print_stacktrace(stacktrace: &Stacktrace) {
    for frame in stacktrace.frames() {
        println!("{}", format_frame(frame));
    }
}

fn format_frame(frame: &Frame) -> String {
    let location = if frame.filename.is_empty() {
        "<unknown>".bright_black().to_string()
    } else {
        format!("{}:{}", frame.filename.cyan(), frame.lnum)
    };
    format!("{location}: {}", frame.text)
}

pub fn print_records(records: &[ErrorRecord]) {
    if records.is_empty() {
        println!("{}", "no errors in message history".bright_black());
        return;
    }
    for (i, record) in records.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).bright_black(), record.throwpoint.yellow());
        for message in &record.messages {
            println!("    {}", message.red());
        }
    }
}
