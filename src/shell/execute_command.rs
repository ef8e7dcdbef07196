use std::fs::File;
use std::os::unix::io::{BorrowedFd, OwnedFd};
use std::process::{self, Stdio};

use nix::errno::Errno;
use nix::libc;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, Pid};

use crate::core::parser::{Command, Job};
use crate::errors::{ErrorKind, Result, ResultExt};

/// What a finished pipeline hands back to its caller.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Read end of the last stage's stdout. The caller owns it; dropping it
    /// closes the descriptor.
    pub stdout: File,
    /// Exit code of every stage, in pipeline order.
    pub exit_codes: Vec<i32>,
}

impl PipelineOutput {
    pub fn last_exit_code(&self) -> Option<i32> {
        self.exit_codes.last().cloned()
    }
}

/// The descriptor feeding the next stage.
#[derive(Debug)]
enum StageInput<'a> {
    /// Supplied by the caller, never closed here.
    Initial(BorrowedFd<'a>),
    /// Read end of the previous stage's pipe.
    Pipe(OwnedFd),
}

impl<'a> StageInput<'a> {
    /// Gives up this input as a descriptor the next owner may close. The
    /// caller's source is duplicated rather than handed over.
    fn into_owned(self) -> Result<OwnedFd> {
        match self {
            StageInput::Initial(fd) => fd
                .try_clone_to_owned()
                .chain_err(|| ErrorKind::Process("failed to duplicate pipeline input".into())),
            StageInput::Pipe(fd) => Ok(fd),
        }
    }
}

/// Runs every command of `job`, chaining stdout to stdin through pipes, with
/// `input` connected to the first stage.
///
/// Stages run one at a time: each child is waited for before the next one is
/// launched, so every stage's output has to fit in a pipe buffer. A stage that
/// exits (with any code) hands its output to the next stage; a stage killed by
/// a signal fails the whole pipeline. Every descriptor opened here is closed
/// on the error paths.
///
/// For a job without commands the result reads from a duplicate of `input`.
pub fn execute(input: BorrowedFd<'_>, job: &Job) -> Result<PipelineOutput> {
    let mut input = StageInput::Initial(input);
    let mut exit_codes = Vec::with_capacity(job.commands.len());

    for command in &job.commands {
        let program = match command.program() {
            Some(program) => program,
            None => bail!(ErrorKind::Process("empty command in pipeline".into())),
        };

        let (read_end, write_end) = create_pipe()?;
        let pid = spawn_stage(program, command, input.into_owned()?, write_end)?;
        let exit_code = wait_for_stage(program, pid)?;
        exit_codes.push(exit_code);
        input = StageInput::Pipe(read_end);
    }

    Ok(PipelineOutput {
        stdout: File::from(input.into_owned()?),
        exit_codes,
    })
}

/// Launches one stage with `stdin` and `stdout` installed as fds 0 and 1.
///
/// Both descriptors are consumed: the parent's copies are closed once the
/// child has been created. All pipeline descriptors are close-on-exec, so the
/// child keeps nothing but its own stdin and stdout. When the program image
/// cannot be loaded the child never runs any of our code; the spawn itself
/// fails with the exec error.
fn spawn_stage(program: &str, command: &Command, stdin: OwnedFd, stdout: OwnedFd) -> Result<Pid> {
    info!("launching '{}'", command);
    let child = process::Command::new(program)
        .args(command.args())
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .spawn()
        .chain_err(|| ErrorKind::Process(format!("failed to execute '{}'", program)))?;

    Ok(Pid::from_raw(child.id() as libc::pid_t))
}

fn wait_for_stage(program: &str, pid: Pid) -> Result<i32> {
    loop {
        match wait::waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!("'{}' ({}) exited with {}", program, pid, code);
                return Ok(code);
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                error!("'{}' ({}) terminated by {:?}", program, pid, signal);
                bail!(ErrorKind::Signaled(program.to_string(), signal as i32));
            }
            Ok(status) => debug!("ignoring wait status {:?}", status),
            Err(Errno::EINTR) => continue,
            Err(e) => {
                return Err(e)
                    .chain_err(|| ErrorKind::Process(format!("failed to wait for '{}'", program)))
            }
        }
    }
}

/// Returns (`read_end`, `write_end`), both close-on-exec.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
fn create_pipe() -> Result<(OwnedFd, OwnedFd)> {
    use nix::fcntl::OFlag;

    unistd::pipe2(OFlag::O_CLOEXEC).chain_err(|| ErrorKind::Process("failed to create pipe".into()))
}

/// Returns (`read_end`, `write_end`), both close-on-exec.
#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
fn create_pipe() -> Result<(OwnedFd, OwnedFd)> {
    use nix::fcntl::{self, FcntlArg, FdFlag};
    use std::os::unix::io::AsRawFd;

    let (read_end, write_end) =
        unistd::pipe().chain_err(|| ErrorKind::Process("failed to create pipe".into()))?;
    for fd in &[&read_end, &write_end] {
        fcntl::fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))
            .chain_err(|| ErrorKind::Process("failed to configure pipe".into()))?;
    }
    Ok((read_end, write_end))
}
