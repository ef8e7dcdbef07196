//! Pipesh - a minimal pipeline shell
//!
//! A line is parsed into a [`Job`](core/parser/struct.Job.html), its program
//! names are resolved against `PATH`, and the stages are run as a chain of
//! processes connected by pipes.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

/// Logs the error (if one occurred) and continues.
#[macro_export]
macro_rules! log_if_err {
    ($result:expr, $($arg:tt)+) => {
        if let Err(ref e) = $result {
            error!("{}: {}", format_args!($($arg)+), e);
        }
    };
}

pub mod core;
pub mod errors;
pub mod shell;
pub mod util;

pub use crate::core::{
    parser::{Command, Job},
    search_path::SearchPath,
};
pub use crate::shell::{Shell, ShellConfig};
pub use crate::util::ShellExitStatusExt;
