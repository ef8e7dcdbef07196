//! Pipesh Parser
//!
//! ```text
//! JOB = CMD ('|' CMD)* ('>' STR)?
//! CMD = STR (' '+ STR)*
//! STR = [^ |>\n]+
//! ```
//!
//! There is no quoting, whitespace alone separates words. Parsing never fails:
//! empty commands are dropped and anything the grammar cannot place is ignored.

use self::lexer::{Cursor, Token};

pub mod ast;
pub mod lexer;

pub use self::ast::{Command, Job};

impl Job {
    /// Parse `input` according to the pipesh grammar.
    pub fn parse(input: &str) -> Job {
        let mut cursor = Cursor::new(input);
        let job = parse_job(&mut cursor);
        debug!("parsed Job: {:?}", job);
        job
    }
}

fn parse_str(cursor: &mut Cursor) -> String {
    let mut word = String::new();
    while cursor.token() == Token::StrChar {
        word.push(cursor.current());
        cursor.advance();
    }
    word
}

fn parse_command(cursor: &mut Cursor) -> Command {
    let mut command = Command::default();
    cursor.skip_separators();
    loop {
        let word = parse_str(cursor);
        if !word.is_empty() {
            command.argv.push(word);
        }

        if cursor.token() == Token::Separator {
            cursor.advance();
        } else {
            return command;
        }
    }
}

fn parse_job(cursor: &mut Cursor) -> Job {
    let mut job = Job::default();
    loop {
        cursor.skip_separators();
        let command = parse_command(cursor);
        if !command.is_empty() {
            job.commands.push(command);
        }

        // parse_command consumes trailing separators, so the next token is
        // never a separator here
        if cursor.token() == Token::Pipe {
            cursor.advance();
        } else {
            break;
        }
    }

    if cursor.token() == Token::Redirect {
        cursor.advance();
        cursor.skip_separators();
        job.redirect = Some(parse_str(cursor));
    }

    job
}
