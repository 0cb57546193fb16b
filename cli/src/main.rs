use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use vimstack::index::{FunctionIndexer, VimScriptIndexer};
use vimstack::{OfflineRuntime, SelectorBoxed, Session, service};

mod logging;
mod prompt;
mod render;

use prompt::TerminalSelector;

#[derive(Parser)]
#[command(
    name = "vimstack",
    version,
    about = "Rich stacktraces from Vim script throwpoints and message history"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a stacktrace from a throwpoint such as `function F[3]..G, line 2`
    Build {
        throwpoint: String,
        /// Print the stacktrace as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the errors recorded in a message history dump
    Histerrs {
        /// File holding `:messages` output; stdin when omitted
        file: Option<PathBuf>,
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
        /// Pick one error and print its stacktrace
        #[arg(long)]
        select: bool,
    },
    /// Print the function definition lines of a Vim script file
    Index { file: PathBuf },
    /// Answer channel messages (`[msgid, body]` JSON lines) on stdin/stdout
    Serve,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("{} {err}", "error:".red().bold());
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Build { throwpoint, json } => {
            let stacktrace = offline_session().build(&throwpoint)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stacktrace)?);
            } else {
                render::print_stacktrace(&stacktrace);
            }
        }
        Command::Histerrs { file, json, select } => {
            let msghist = read_input(file)?;
            if select {
                return select_and_build(&msghist, json);
            }
            let records = offline_session().histerrs(Some(&msghist))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                render::print_records(&records);
            }
        }
        Command::Index { file } => {
            let mut funcs: Vec<_> = VimScriptIndexer.index(&file)?.into_iter().collect();
            funcs.sort_by_key(|(_, line)| *line);
            for (name, line) in funcs {
                println!("{} {}", format!("{line:>5}").bright_black(), name);
            }
        }
        Command::Serve => serve()?,
    }
    Ok(())
}

fn offline_session() -> Session {
    Session::builder().build(OfflineRuntime)
}

fn read_input(file: Option<PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn select_and_build(msghist: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::builder()
        .with_selector(SelectorBoxed::new(TerminalSelector))
        .build(OfflineRuntime);
    let Some(selected) = session.select_error(msghist)? else {
        eprintln!("{}", "nothing selected".bright_black());
        return Ok(());
    };
    let stacktrace = session.build(&selected.throwpoint)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stacktrace)?);
    } else {
        for message in &selected.messages {
            println!("{}", message.red());
        }
        render::print_stacktrace(&stacktrace);
    }
    Ok(())
}

fn serve() -> io::Result<()> {
    let session = offline_session();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = service::handle_message(&session, &line) {
            writeln!(stdout, "{response}")?;
            stdout.flush()?;
        }
    }
    log::info!("stdin closed, shutting down");
    Ok(())
}
