use std::fmt;

/// A single pipeline stage. `argv[0]` is the program name or path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Command {
    pub argv: Vec<String>,
}

impl Command {
    pub fn new<S: AsRef<str>>(argv: &[S]) -> Self {
        Self {
            argv: argv.iter().map(|arg| arg.as_ref().to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    /// Returns `None` for a command without arguments.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        if self.argv.is_empty() {
            &[]
        } else {
            &self.argv[1..]
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// A parsed input line: the pipeline stages in execution order and the
/// optional output redirection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Job {
    pub commands: Vec<Command>,
    /// `None` when no `>` was seen. `Some("")` when `>` had no target.
    pub redirect: Option<String>,
}

impl Job {
    /// A job without commands has nothing to execute.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The redirect target, if one was given and it is non-empty.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_ref().map(String::as_str).filter(|t| !t.is_empty())
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let commands: Vec<String> = self.commands.iter().map(ToString::to_string).collect();
        write!(f, "{}", commands.join(" | "))?;
        if let Some(ref target) = self.redirect {
            write!(f, " > {}", target)?;
        }
        Ok(())
    }
}
