//! Output destinations, allowing "-" to mean stdout.

use std::fmt;
use std::fs::File;
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Error, Result};

/// Specifies a file to read from or write to (depending on context).
#[derive(Clone, Debug, PartialEq)]
pub enum FileSpec {
    /// Read from stdin or write to stdout.
    Stdio,
    /// Read from or write to the file at the given path.
    Path(PathBuf),
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        use FileSpec::*;
        match self {
            Stdio => f.write_str("<stdio>"),
            Path(path) => write!(f, "{:?}", path),
        }
    }
}

impl FileSpec {
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        use FileSpec::*;
        Ok(match self {
            Stdio => Box::new(stdout()),
            Path(path) => Box::new(
                File::create(path).with_context(|| format!("opening {:?} for writing", path))?,
            ),
        })
    }
}

impl FromStr for FileSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        use FileSpec::*;
        if s == "-" {
            Ok(Stdio)
        } else {
            Ok(Path(s.into()))
        }
    }
}

pub fn write_file(file_spec: &FileSpec, content: &str) -> Result<()> {
    let mut f = file_spec.writer()?;
    f.write_all(content.as_bytes())
        .with_context(|| format!("writing to {}", file_spec))?;
    f.flush().with_context(|| format!("flushing {}", file_spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(FileSpec::Stdio, "-".parse::<FileSpec>().expect("parse"));
        assert_eq!(
            FileSpec::Path(PathBuf::from("out.ledger")),
            "out.ledger".parse::<FileSpec>().expect("parse")
        );
    }

    #[test]
    fn write_to_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.ledger");
        write_file(&FileSpec::Path(path.clone()), "content\n").expect("write");
        assert_eq!("content\n", std::fs::read_to_string(path).expect("read back"));
    }
}
