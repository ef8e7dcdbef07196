//! Single-character classification and the saturating input cursor.

/// Returned by `Cursor::current` once the input is exhausted. A literal
/// newline in the input ends parsing the same way.
pub const END: char = '\n';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Pipe,
    Redirect,
    Separator,
    StrChar,
    End,
}

pub fn classify(c: char) -> Token {
    match c {
        '|' => Token::Pipe,
        '>' => Token::Redirect,
        ' ' => Token::Separator,
        END => Token::End,
        _ => Token::StrChar,
    }
}

/// Cursor over one input line.
///
/// Never runs past the end: `current` yields `END` for an empty line or a
/// position at the end, and `advance` stops one past the last character.
#[derive(Debug)]
pub struct Cursor<'input> {
    input: &'input str,
    /// Byte offset into `input`, always on a char boundary.
    position: usize,
}

impl<'input> Cursor<'input> {
    pub fn new(input: &'input str) -> Self {
        Self { input, position: 0 }
    }

    pub fn current(&self) -> char {
        self.input[self.position..].chars().next().unwrap_or(END)
    }

    pub fn token(&self) -> Token {
        classify(self.current())
    }

    pub fn advance(&mut self) -> char {
        if let Some(c) = self.input[self.position..].chars().next() {
            self.position += c.len_utf8();
        }
        self.current()
    }

    pub fn skip_separators(&mut self) {
        while self.token() == Token::Separator {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify('|'), Token::Pipe);
        assert_eq!(classify('>'), Token::Redirect);
        assert_eq!(classify(' '), Token::Separator);
        assert_eq!(classify('\n'), Token::End);
        assert_eq!(classify('a'), Token::StrChar);
        assert_eq!(classify('<'), Token::StrChar);
        assert_eq!(classify('\t'), Token::StrChar);
        assert_eq!(classify('é'), Token::StrChar);
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = Cursor::new("");
        assert_eq!(cursor.current(), END);
        assert_eq!(cursor.advance(), END);
        assert_eq!(cursor.token(), Token::End);
    }

    #[test]
    fn test_cursor_saturates_at_end() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), 'a');
        assert_eq!(cursor.advance(), 'b');
        assert_eq!(cursor.advance(), END);
        assert_eq!(cursor.advance(), END);
        assert_eq!(cursor.advance(), END);
        assert_eq!(cursor.current(), END);
    }

    #[test]
    fn test_cursor_multibyte() {
        let mut cursor = Cursor::new("日本");
        assert_eq!(cursor.current(), '日');
        assert_eq!(cursor.advance(), '本');
        assert_eq!(cursor.advance(), END);
    }

    #[test]
    fn test_skip_separators() {
        let mut cursor = Cursor::new("   x");
        cursor.skip_separators();
        assert_eq!(cursor.current(), 'x');
        cursor.skip_separators();
        assert_eq!(cursor.current(), 'x');
    }
}
