//! Shell Commands
//!
//! Parses one input line into a cache command.
//!
//! Query text after the verb is taken verbatim (only the single separating
//! space is consumed), since cache keys are compared byte for byte.

use crate::error::{CacheError, Result};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET <query>`
    Get { query: String },
    /// `PUT <query>\t<result>`
    Put { query: String, result: String },
    /// `INVALIDATE <table>`
    Invalidate { table: String },
    /// `REMOVE <query>`
    Remove { query: String },
    /// `CLEAR`
    Clear,
    /// `PURGE`
    Purge,
    /// `STATS`
    Stats,
    /// `QUIT` or `EXIT`
    Quit,
}

impl Command {
    /// Parses a single line. Verbs are case-insensitive.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        match verb.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get {
                query: required(rest, "GET expects a query")?,
            }),
            "PUT" => {
                let (query, result) = rest.split_once('\t').ok_or_else(|| {
                    CacheError::InvalidCommand(
                        "PUT expects <query><TAB><result>".to_string(),
                    )
                })?;
                Ok(Self::Put {
                    query: required(query, "PUT expects a non-empty query")?,
                    result: result.to_string(),
                })
            }
            "INVALIDATE" => Ok(Self::Invalidate {
                table: required(rest.trim(), "INVALIDATE expects a table name")?,
            }),
            "REMOVE" => Ok(Self::Remove {
                query: required(rest, "REMOVE expects a query")?,
            }),
            "CLEAR" => bare(rest, Self::Clear),
            "PURGE" => bare(rest, Self::Purge),
            "STATS" => bare(rest, Self::Stats),
            "QUIT" | "EXIT" => bare(rest, Self::Quit),
            "" => Err(CacheError::InvalidCommand("empty command".to_string())),
            other => Err(CacheError::InvalidCommand(format!(
                "unknown command '{}'",
                other
            ))),
        }
    }
}

fn required(arg: &str, message: &str) -> Result<String> {
    if arg.is_empty() {
        return Err(CacheError::InvalidCommand(message.to_string()));
    }
    Ok(arg.to_string())
}

fn bare(rest: &str, command: Command) -> Result<Command> {
    if !rest.trim().is_empty() {
        return Err(CacheError::InvalidCommand(format!(
            "{:?} takes no arguments",
            command
        )));
    }
    Ok(command)
}
