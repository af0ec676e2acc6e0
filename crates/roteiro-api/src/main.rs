//! roteiro command-line entry point.
//!
//! Binary name: `roteiro`
//!
//! Parses CLI arguments, sets up tracing, opens storage, then dispatches to
//! the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use roteiro_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_directive};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "roteiro", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.data_dir.as_deref(), cli.ephemeral).await?;

    let result = match cli.command {
        Commands::Chat { persona } => cli::chat::loop_runner::run_chat_loop(&state, persona).await,
        Commands::Ask { question, persona } => {
            cli::ask::ask(&state, &question, persona, cli.json).await
        }
        Commands::History { persona } => cli::history::history(&state, persona, cli.json).await,
        Commands::Persona { action } => cli::persona::persona(&state, action, cli.json).await,
        Commands::Forget { persona, force } => {
            cli::forget::forget(&state, persona, force, cli.json).await
        }
        Commands::Export {
            persona,
            format,
            output,
        } => cli::export::export(&state, persona, format, output, cli.json).await,
        Commands::Status => cli::status::status(&state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
