use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use db::Repl;

/// A tiny single-table row store driven from standard input.
#[derive(Parser, Debug)]
#[command(name = "db")]
#[command(version, about, long_about = None)]
struct Args {
    /// Log to stderr; repeat for more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => {
                return EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
            }
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();

    match Repl::new().run(&mut input, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "repl aborted");
            let _ = stdout.flush();
            let _ = writeln!(io::stderr(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}
