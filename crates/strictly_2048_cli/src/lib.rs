//! Strictly 2048 terminal front-end
//!
//! A thin embedding layer over the `strictly_2048` engine. It owns the
//! concerns the engine leaves to its callers:
//!
//! - **Config**: TOML file with command-line overrides
//! - **Command**: parsing and validating user input
//! - **Session**: one game shared behind a mutex, with reset and
//!   change notification
//! - **Play**: the line-oriented loop and random autoplay

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod command;
pub mod config;
pub mod play;
pub mod session;

pub use cli::{Cli, Command, GameArgs};
pub use command::{CommandError, SessionCommand};
pub use config::{ConfigError, GameConfig};
pub use play::{OutputFormat, Summary, autoplay, render, run_session};
pub use session::SharedGame;
