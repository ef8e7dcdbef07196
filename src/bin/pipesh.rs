extern crate docopt;
extern crate fern;
#[macro_use]
extern crate log;
extern crate nix;
extern crate pipesh;
#[macro_use]
extern crate serde_derive;

use docopt::Docopt;
use log::LevelFilter;
use nix::unistd::Pid;
use pipesh::errors::*;
use pipesh::{Shell, ShellConfig, ShellExitStatusExt};
use std::path::PathBuf;
use std::process::{self, ExitStatus};

const LOG_FILE_NAME: &str = ".pipesh_log";

const USAGE: &str = "
pipesh.

Usage:
    pipesh [options]
    pipesh [options] -c <command>
    pipesh (-h | --help)
    pipesh --version

Options:
    -h --help             Show this screen.
    --version             Show version.
    -c                    If the -c option is present, then the pipeline is read from the first
                              non-option argument command_string.
    --log=<path>          File to write log to, defaults to ~/.pipesh_log
    --log-level=<level>   One of off, error, warn, info, debug, trace [default: info]
    --no-prompt           Do not display a prompt when reading from a terminal.
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_log: Option<String>,
    flag_log_level: String,
    flag_no_prompt: bool,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logger(&args) {
        eprintln!("pipesh: logging disabled: {}", e);
    }
    debug!("{:?}", args);

    if args.flag_version {
        println!("pipesh version {}", env!("CARGO_PKG_VERSION"));
    } else if args.flag_c {
        execute_from_command_string(&args);
    } else {
        execute_from_stdin(&args);
    }
}

fn init_logger(args: &Args) -> Result<()> {
    let level: LevelFilter = args.flag_log_level.parse().map_err(|_| {
        ErrorKind::Configuration(format!("invalid log level '{}'", args.flag_log_level))
    })?;
    let log_path = args
        .flag_log
        .clone()
        .map(PathBuf::from)
        .or_else(default_log_path)
        .ok_or_else(|| ErrorKind::Configuration("unable to get home directory".into()))?;

    let pid = Pid::this();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(&log_path).chain_err(|| ErrorKind::Filesystem(log_path.clone()))?)
        .apply()
        .map_err(|e| ErrorKind::Configuration(e.to_string()))?;
    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_FILE_NAME))
}

fn execute_from_command_string(args: &Args) -> ! {
    let mut shell =
        Shell::new(ShellConfig::noninteractive()).unwrap_or_else(|e| display_error_and_exit(&e));
    let command = args.arg_command.as_deref().unwrap_or("");
    let result = shell.execute_command_string(command);
    exit(result, &mut shell);
}

fn execute_from_stdin(args: &Args) -> ! {
    let config = if pipesh::util::stdin_is_terminal() && !args.flag_no_prompt {
        ShellConfig::interactive()
    } else {
        ShellConfig::noninteractive()
    };
    let mut shell = Shell::new(config).unwrap_or_else(|e| display_error_and_exit(&e));
    let result = shell.execute_from_stdin();
    exit(result, &mut shell);
}

fn display_error(error: &Error) {
    error!("{}", error);
    eprintln!("pipesh: {}", error);
    for cause in error.iter().skip(1) {
        eprintln!("pipesh: caused by: {}", cause);
    }
}

fn display_error_and_exit(error: &Error) -> ! {
    display_error(error);
    process::exit(ExitStatus::from_failure().code().unwrap_or(1));
}

fn exit(result: Result<()>, shell: &mut Shell) -> ! {
    if let Err(e) = result {
        display_error(&e);
        shell.exit(Some(ExitStatus::from_failure()));
    } else {
        shell.exit(None);
    }
}
