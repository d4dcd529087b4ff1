//! Shell Module
//!
//! Line-oriented command interface over a cache context, one JSON response
//! per command.
//!
//! # Commands
//! - `GET <query>` - Look up a cached result
//! - `PUT <query>\t<result>` - Store a result
//! - `INVALIDATE <table>` - Drop queries mentioning a table
//! - `REMOVE <query>` - Drop one query
//! - `CLEAR` - Drop everything
//! - `PURGE` - Drop expired entries now
//! - `STATS` - Report cache statistics
//! - `QUIT` - End the session

pub mod command;
pub mod response;
pub mod session;

pub use command::Command;
pub use response::{Response, StatsResponse};
pub use session::{execute, serve};
