//! Pipesh - Shell Module
//!
//! The Shell reads lines, runs each one as a pipeline and delivers the
//! pipeline's output. It holds the search path, read once at start-up.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::os::unix::io::AsFd;
use std::process::{self, ExitStatus};

use crate::core::{parser::Job, search_path::SearchPath};
use crate::errors::Result;
use crate::shell::{execute_command, redirect, ShellConfig, PROMPT};
use crate::util::ShellExitStatusExt;

/// Pipesh Shell
pub struct Shell {
    search_path: SearchPath,
    /// Exit status of the last stage of the last pipeline executed.
    last_exit_status: ExitStatus,
    config: ShellConfig,
}

impl Shell {
    /// Constructs a new Shell, reading the search path from `PATH`.
    pub fn new(config: ShellConfig) -> Result<Shell> {
        let search_path = SearchPath::from_env()?;
        info!("pipesh started up");
        Ok(Shell::with_search_path(config, search_path))
    }

    pub fn with_search_path(config: ShellConfig, search_path: SearchPath) -> Shell {
        debug!("search path: {:?}", search_path.dirs());
        Shell {
            search_path,
            last_exit_status: ExitStatus::from_success(),
            config,
        }
    }

    pub fn last_exit_status(&self) -> ExitStatus {
        self.last_exit_status
    }

    /// Runs a job from a command string.
    ///
    /// Parsing never fails; an empty job does nothing. Resolution, execution
    /// and output failures are returned and leave no partial output behind.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let job = Job::parse(input);
        if job.is_empty() {
            if job.redirect.is_some() {
                warn!("ignoring redirect without a command: '{}'", input.trim_end());
            }
            return Ok(());
        }

        let job = self.search_path.resolve(job)?;
        let stdin = io::stdin();
        let mut output = execute_command::execute(stdin.as_fd(), &job)?;
        if let Some(code) = output.last_exit_code() {
            self.last_exit_status = ExitStatus::from_status(code);
        }

        if job.redirect.is_some() && job.redirect_target().is_none() {
            warn!("redirect without a target, writing to stdout");
        }
        redirect::write_output(&mut output.stdout, job.redirect_target())?;
        Ok(())
    }

    /// Runs jobs from stdin until EOF is received. The first failing job
    /// stops the loop. Bytes that are not valid UTF-8 are replaced and the
    /// line still runs.
    pub fn execute_from_stdin(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut line = Vec::new();
        loop {
            if self.config.display_prompt {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(PROMPT.as_bytes())?;
                handle.flush()?;
            }

            line.clear();
            if stdin.lock().read_until(b'\n', &mut line)? == 0 {
                debug!("reached end of input");
                break;
            }

            let text = String::from_utf8_lossy(&line);
            if let Cow::Owned(_) = text {
                warn!("input line is not valid UTF-8: '{}'", text.trim_end());
            }
            self.execute_command_string(&text)?;
        }

        Ok(())
    }

    /// Exit the shell.
    ///
    /// Exit the shell with a status of n. If n is None, then the exit status is that of the last
    /// command executed and "exit" is announced in interactive mode.
    pub fn exit(&mut self, n: Option<ExitStatus>) -> ! {
        if self.announces_exit(n) {
            println!("exit");
        }

        let code = n
            .unwrap_or(self.last_exit_status)
            .code()
            .unwrap_or(1);

        log_if_err!(io::stdout().flush(), "failed to flush stdout");
        info!("pipesh has shut down");
        process::exit(code);
    }

    fn announces_exit(&self, n: Option<ExitStatus>) -> bool {
        n.is_none() && self.config.display_messages
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "last exit status: {}\n{:?}",
            self.last_exit_status, self.config
        )
    }
}
