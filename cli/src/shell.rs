//! Line-oriented interactive loop shared by the online and offline boards.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::command::{parse_line, Line, HELP};
use crate::session::Session;

/// Read commands from `input` until EOF or `quit`, re-rendering the screen
/// after every action.
pub async fn run_shell<S, R, W>(session: &mut S, input: R, out: &mut W) -> io::Result<()>
where
    S: Session,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", session.screen().await)?;
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Line::Quit)) => break,
            Ok(Some(Line::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(Line::Act(action))) => {
                debug!(?action, "shell action");
                if let Some(notice) = session.apply(action).await {
                    writeln!(out, "{notice}")?;
                }
                write!(out, "{}", session.screen().await)?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }
    writeln!(out)?;
    Ok(())
}
