//! Terminal front-end for the todo board.
//!
//! # Overview
//! One-shot subcommands (`list`, `add`, `toggle`, `edit`, `delete`) mount the
//! board, perform a single action and print the resulting screen. `shell`
//! keeps the board open and reads commands from stdin; `offline` does the
//! same with an in-memory board and no server.

pub mod command;
pub mod config;
pub mod session;
pub mod shell;
pub mod transport;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_core::{LocalBoard, Screen, TodoClient, TodoId, TodoStore};
use tracing::info;

use crate::command::Action;
use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::session::{OfflineSession, OnlineSession, Session};
use crate::transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "List, add, edit, toggle and delete todos")]
pub struct Cli {
    /// Base URL of the todo API.
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "TODO_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show all todos (default).
    List,
    /// Add a todo.
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Flip a todo between completed and pending.
    Toggle { id: TodoId },
    /// Replace a todo's text.
    Edit {
        id: TodoId,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Remove a todo.
    Delete { id: TodoId },
    /// Interactive shell against the API.
    Shell,
    /// Interactive shell on an in-memory board; nothing is sent anywhere.
    Offline,
}

impl CliCommand {
    /// The single action a one-shot command performs; `None` for shells.
    pub fn action(&self) -> Option<Action> {
        Some(match self {
            CliCommand::List => Action::List,
            CliCommand::Add { text } => Action::Add(text.join(" ")),
            CliCommand::Toggle { id } => Action::Toggle(*id),
            CliCommand::Edit { id, text } => Action::Edit(*id, text.join(" ")),
            CliCommand::Delete { id } => Action::Delete(*id),
            CliCommand::Shell | CliCommand::Offline => return None,
        })
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let command = cli.command.unwrap_or(CliCommand::List);

    if command == CliCommand::Offline {
        let mut session = OfflineSession::new(LocalBoard::new());
        interactive(&mut session).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::new(&cli.base_url, cli.timeout_secs)?;
    info!(base_url = %config.base_url, "using todo api");
    let store = TodoStore::new(
        TodoClient::new(&config.base_url),
        UreqTransport::new(config.timeout),
    );
    let mut session = OnlineSession::new(store);
    session.start().await;

    let Some(action) = command.action() else {
        interactive(&mut session).await?;
        return Ok(ExitCode::SUCCESS);
    };

    // Mounting already fetched the list.
    let notice = match action {
        Action::List => None,
        action => session.apply(action).await,
    };
    if let Some(notice) = &notice {
        eprintln!("{notice}");
    }
    let screen = session.screen().await;
    print!("{screen}");

    if notice.is_some() || matches!(screen, Screen::Failed(_)) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn interactive<S: Session>(session: &mut S) -> std::io::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell::run_shell(session, stdin, &mut std::io::stdout()).await
}
