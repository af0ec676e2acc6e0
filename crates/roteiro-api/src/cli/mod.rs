//! CLI command definitions and dispatch for the `roteiro` binary.
//!
//! Uses clap derive macros for argument parsing. `chat` is the interactive
//! surface; the other commands are one-shot views over the same stored state.

pub mod ask;
pub mod chat;
pub mod export;
pub mod forget;
pub mod history;
pub mod persona;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use roteiro_types::persona::PersonaId;

use self::export::ExportFormat;

/// Chat with the dispensing guidance assistants.
#[derive(Parser)]
#[command(name = "roteiro", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the database and config.toml.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Also export traces through OpenTelemetry (stdout).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Persona to talk to (professor, amigo). Defaults to the last one used.
        #[arg(long, short)]
        persona: Option<PersonaId>,
    },

    /// Ask a single question and print the reply.
    Ask {
        /// The question.
        question: String,

        /// Persona to ask. Becomes the selected persona.
        #[arg(long, short)]
        persona: Option<PersonaId>,
    },

    /// Print a persona's stored conversation.
    #[command(alias = "historico")]
    History {
        /// Persona whose log to print. Defaults to the selected one.
        #[arg(long, short)]
        persona: Option<PersonaId>,
    },

    /// Show or change the selected persona.
    Persona {
        #[command(subcommand)]
        action: Option<PersonaCommand>,
    },

    /// Delete a persona's stored conversation.
    Forget {
        /// Persona whose log to delete. Defaults to the selected one.
        #[arg(long, short)]
        persona: Option<PersonaId>,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Export a persona's conversation as text, HTML or JSON.
    Export {
        /// Persona to export. Defaults to the selected one.
        #[arg(long, short)]
        persona: Option<PersonaId>,

        /// Output format.
        #[arg(long, short, value_enum, default_value = "txt")]
        format: ExportFormat,

        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Configuration, storage and answer service health.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PersonaCommand {
    /// Print the selected persona (default).
    Show,

    /// Select a persona for future sessions.
    Set {
        /// professor or amigo.
        persona: PersonaId,
    },
}
