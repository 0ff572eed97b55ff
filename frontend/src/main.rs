//! Terminal frontend for the to-do list.

mod app;
mod command;
mod transport;

use std::io::{self, BufRead, Write};

use clap::{ArgAction, Parser};
use todo_core::{view, TodoClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, Flow};
use command::HELP;
use transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Terminal client for the to-do list")]
struct Args {
    /// Base URL of the todo backend.
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:4000")]
    api_url: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    info!(api_url = %args.api_url, "starting");

    let mut app = App::new(TodoClient::new(&args.api_url), UreqTransport::new())
        .with_redraw(|state| print!("\n{}", view::render(state)));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    app.load();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "\n{}> ", view::render(app.state()))?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match app.handle_line(&line?) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Help) => writeln!(stdout, "{HELP}")?,
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stderr keeps log lines out of the rendered screen
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
