#[path = "mailreach-cli/args.rs"]
mod args;
#[path = "mailreach-cli/output.rs"]
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use mailreach::CheckContext;
use output::OutputRow;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let emails = if cli.stdin {
        let mut emails = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            if !line.trim().is_empty() {
                emails.push(line);
            }
        }
        emails
    } else if let Some(Commands::Verify { emails }) = &cli.cmd {
        emails.clone()
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    };

    let verifier = cli.verifier()?;
    let deadline = cli.deadline;
    let rows: Vec<OutputRow> = stream::iter(emails)
        .map(|email| {
            let verifier = &verifier;
            async move {
                let ctx = match deadline {
                    Some(budget) => CheckContext::new().with_timeout(budget),
                    None => CheckContext::new(),
                };
                let outcome = verifier.verify_with(&email, &ctx).await;
                OutputRow::new(&email, outcome)
            }
        })
        .buffered(cli.jobs.max(1))
        .collect()
        .await;

    output::write_reports(&rows, &cli)?;

    if output::any_failed(&rows) {
        std::process::exit(2);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
