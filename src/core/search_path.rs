//! Program name resolution against the directories listed in `PATH`.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use nix::libc;
use regex::Regex;

use crate::core::parser::Job;
use crate::errors::{ErrorKind, Result, ResultExt};

const PATH_VAR: &str = "PATH";

/// Ordered list of directories searched for programs. Earlier entries win.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<P: AsRef<Path>>(dirs: &[P]) -> Self {
        Self {
            dirs: dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
        }
    }

    /// Reads `PATH` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_var(env::var_os(PATH_VAR))
    }

    fn from_var(value: Option<OsString>) -> Result<Self> {
        let value = value
            .ok_or_else(|| ErrorKind::Configuration(format!("{} is not set", PATH_VAR)))?;
        let value = value.into_string().map_err(|_| {
            ErrorKind::Configuration(format!("{} is not valid Unicode", PATH_VAR))
        })?;
        Ok(Self::parse(&value))
    }

    /// Splits a colon separated list of directories, skipping empty entries.
    pub fn parse(value: &str) -> Self {
        lazy_static! {
            static ref PATH_ENTRY: Regex = Regex::new("[^:]+").unwrap();
        }

        Self {
            dirs: PATH_ENTRY
                .find_iter(value)
                .map(|m| PathBuf::from(m.as_str()))
                .collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Replaces each command's program name with the first `dir/program` that
    /// exists. Programs that are not found are left untouched so absolute and
    /// relative paths reach the executor as written.
    ///
    /// A candidate that is missing, or whose directory entry is not a
    /// directory, is skipped. Any other failing existence check (for example
    /// permission denied on an intermediate directory) aborts resolution of
    /// the whole job.
    pub fn resolve(&self, mut job: Job) -> Result<Job> {
        for command in job.commands.iter_mut() {
            let program = match command.argv.first_mut() {
                Some(program) => program,
                None => continue,
            };

            if let Some(found) = self.find(program)? {
                debug!("resolved '{}' to '{}'", program, found.display());
                *program = found.to_string_lossy().into_owned();
            } else {
                debug!("'{}' not found in {}", program, PATH_VAR);
            }
        }

        Ok(job)
    }

    fn find(&self, program: &str) -> Result<Option<PathBuf>> {
        for dir in &self.dirs {
            let candidate = dir.join(program);
            if exists(&candidate).chain_err(|| ErrorKind::Filesystem(candidate.clone()))? {
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }
}

fn exists(candidate: &Path) -> io::Result<bool> {
    match candidate.try_exists() {
        Err(ref e) if e.raw_os_error() == Some(libc::ENOTDIR) => Ok(false),
        result => result,
    }
}
