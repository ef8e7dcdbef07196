use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{self, Command, Stdio};

use tempdir::TempDir;

/// WorkDir represents a directory in which tests are run.
#[derive(Debug)]
pub struct WorkDir {
    /// The directory in which the test will run, removed on drop.
    dir: TempDir,
}

impl WorkDir {
    /// Creates a fresh, empty directory for one test.
    pub fn new(name: &str) -> WorkDir {
        WorkDir {
            dir: TempDir::new(name).expect("failed to create work dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` inside the work dir.
    pub fn create(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("failed to create file");
        path
    }

    /// Builds a new command to run in this working directory. Logging goes to
    /// a file inside the work dir.
    pub fn command<I, S>(&self, args: I) -> process::Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(self.bin());
        cmd.current_dir(self.path());
        cmd.arg(format!("--log={}", self.path().join("pipesh.log").display()));
        cmd.args(args);
        cmd
    }

    /// Returns path to executable.
    fn bin(&self) -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_pipesh"))
    }

    /// Executes the command with `input` on its stdin and collects its output.
    pub fn output_with_stdin<B: AsRef<[u8]>>(
        &self,
        cmd: &mut process::Command,
        input: B,
    ) -> process::Output {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn pipesh");
        child
            .stdin
            .take()
            .expect("stdin should be piped")
            .write_all(input.as_ref())
            .expect("failed to write stdin");
        child.wait_with_output().expect("failed to wait for pipesh")
    }

    /// Executes the command and collects its output.
    ///
    /// Panic if the command fails.
    pub fn output(&self, cmd: &mut process::Command) -> process::Output {
        let o = cmd.stdin(Stdio::null()).output().unwrap();
        if !o.status.success() {
            panic!(
                "\n\n==========\n\
                 command failed but expected success!\
                 \n\ncommand: {:?}\
                 \ncwd: {}\
                 \n\nstatus: {}\
                 \n\nstdout: {}\
                 \n\nstderr: {}\
                 \n\n==========\n",
                cmd,
                self.path().display(),
                o.status,
                String::from_utf8_lossy(&o.stdout),
                String::from_utf8_lossy(&o.stderr)
            );
        }
        o
    }
}
