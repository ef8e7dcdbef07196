pub use self::execute_command::{execute, PipelineOutput};
pub use self::redirect::write_output;
pub use self::shell::Shell;

pub mod execute_command;
pub mod redirect;
pub mod shell;

const PROMPT: &str = "> ";

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Determines if a prompt is written before each line is read.
    display_prompt: bool,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,
}

impl ShellConfig {
    /// Creates an interactive shell configuration
    ///
    /// # Complete List
    /// - The prompt is displayed before each line is read
    /// - Some additional messages are displayed
    pub fn interactive() -> Self {
        Self {
            display_prompt: true,
            display_messages: true,
        }
    }

    /// Creates a noninteractive shell configuration, e.g. for `-c` or piped input
    ///
    /// # Complete List
    /// - No prompt is displayed
    /// - Fewer messages are displayed
    pub fn noninteractive() -> Self {
        Default::default()
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            display_prompt: false,
            display_messages: false,
        }
    }
}
