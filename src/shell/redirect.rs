//! Delivery of a pipeline's output to stdout or to a redirect target.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::errors::{ErrorKind, Result, ResultExt};

/// Copies all of `output` to `target`, or to stdout when there is no target.
///
/// The target file is created (or truncated) only when this is called, which
/// is after the pipeline has succeeded. Callers pass `Job::redirect_target`,
/// which filters out the empty target of a bare `>`. Returns the number of
/// bytes copied.
pub fn write_output<R: Read>(output: &mut R, target: Option<&str>) -> Result<u64> {
    match target {
        Some(target) => {
            let path = Path::new(target);
            let mut file = File::create(path).chain_err(|| ErrorKind::Filesystem(path.into()))?;
            let copied = io::copy(output, &mut file)?;
            debug!("wrote {} bytes to '{}'", copied, path.display());
            Ok(copied)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            copy_and_flush(output, &mut handle)
        }
    }
}

fn copy_and_flush<R: Read, W: Write>(output: &mut R, sink: &mut W) -> Result<u64> {
    let copied = io::copy(output, sink)?;
    sink.flush()?;
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn test_redirect_creates_file() {
        let temp = TempDir::new("pipesh").unwrap();
        let target = temp.path().join("file.out");

        let copied = write_output(&mut "three\nlines\nhere\n".as_bytes(), target.to_str()).unwrap();
        assert_eq!(copied, 17);
        assert_eq!(fs::read_to_string(&target).unwrap(), "three\nlines\nhere\n");
    }

    #[test]
    fn test_redirect_truncates_existing_file() {
        let temp = TempDir::new("pipesh").unwrap();
        let target = temp.path().join("file.out");
        fs::write(&target, "a much longer previous content\n").unwrap();

        write_output(&mut "new\n".as_bytes(), target.to_str()).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
    }

    #[test]
    fn test_redirect_into_missing_directory() {
        let temp = TempDir::new("pipesh").unwrap();
        let target = temp.path().join("missing").join("file.out");

        let error = write_output(&mut "x".as_bytes(), target.to_str()).unwrap_err();
        match *error.kind() {
            ErrorKind::Filesystem(ref path) => assert_eq!(path, &target),
            ref kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn test_copy_and_flush() {
        let mut sink = Vec::new();
        let copied = copy_and_flush(&mut "payload".as_bytes(), &mut sink).unwrap();
        assert_eq!(copied, 7);
        assert_eq!(sink, b"payload");
    }
}
