//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

use std::path::PathBuf;

error_chain! {
    foreign_links {
        Docopt(::docopt::Error);
        Io(::std::io::Error);
        Nix(::nix::Error);
    }

    errors {
        /// The environment or command line cannot be turned into a usable configuration
        Configuration(message: String) {
            description("configuration error")
            display("configuration error: {}", message)
        }

        /// An existence check or file creation failed
        Filesystem(path: PathBuf) {
            description("filesystem error")
            display("filesystem error: '{}'", path.display())
        }

        /// A pipeline stage could not be created, executed or waited for
        Process(message: String) {
            description("process error")
            display("process error: {}", message)
        }

        /// A pipeline stage was terminated by a signal
        Signaled(program: String, signal: i32) {
            description("process terminated by signal")
            display("process error: '{}' terminated by signal {}", program, signal)
        }
    }
}

impl ErrorKind {
    /// Returns `true` for every failure that originates in running a pipeline stage.
    pub fn is_process_error(&self) -> bool {
        match *self {
            ErrorKind::Process(_) | ErrorKind::Signaled(..) => true,
            _ => false,
        }
    }
}
