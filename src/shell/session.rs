//! Shell Session
//!
//! Executes parsed commands against a cache context and drives the
//! line-oriented read/respond loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::command::Command;
use super::response::{Response, StatsResponse};
use crate::cache::entry_footprint;
use crate::clock::Clock;
use crate::context::CacheContext;
use crate::error::Result;

/// Executes one command, turning failures into error responses.
pub fn execute<C: Clock>(context: &CacheContext<C>, command: Command) -> Response {
    debug!(?command, "executing shell command");
    match dispatch(context, command) {
        Ok(response) => response,
        Err(err) => err.into(),
    }
}

fn dispatch<C: Clock>(context: &CacheContext<C>, command: Command) -> Result<Response> {
    let response = match command {
        Command::Get { query } => match context.get(query.as_bytes())? {
            Some(result) => Response::Hit {
                result: String::from_utf8_lossy(&result).into_owned(),
                query,
            },
            None => Response::Miss { query },
        },
        Command::Put { query, result } => {
            context.put(query.as_bytes(), result.as_bytes())?;
            Response::Stored {
                size: entry_footprint(query.len(), result.len()),
                query,
            }
        }
        Command::Invalidate { table } => Response::Invalidated {
            removed: context.invalidate(table.as_bytes())?,
            table,
        },
        Command::Remove { query } => Response::Removed {
            removed: context.remove(query.as_bytes())?,
            query,
        },
        Command::Clear => Response::Cleared {
            removed: context.clear()?,
        },
        Command::Purge => Response::Purged {
            removed: context.purge_expired()?,
        },
        Command::Stats => Response::Stats(StatsResponse::from_stats(&context.stats()?)),
        Command::Quit => Response::Bye,
    };
    Ok(response)
}

/// Reads commands line by line and writes one JSON response per line.
///
/// Blank lines are skipped. Stops at end of input or after `QUIT`.
/// Returns the number of commands answered.
pub async fn serve<C, R, W>(context: &CacheContext<C>, reader: R, mut writer: W) -> anyhow::Result<usize>
where
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let (response, quit) = match Command::parse(&line) {
            Ok(command) => {
                let quit = command == Command::Quit;
                (execute(context, command), quit)
            }
            Err(err) => (Response::from(err), false),
        };

        writer.write_all(response.to_json()?.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        answered += 1;

        if quit {
            break;
        }
    }

    Ok(answered)
}
