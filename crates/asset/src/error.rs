//! Loader errors. Every variant aborts the whole load.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which attribute list a face index points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texcoord",
            Attribute::Normal => "normal",
        })
    }
}

/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("line {line}: invalid {what}: '{token}'")]
    InvalidNumber {
        line: usize,
        what: &'static str,
        token: String,
    },

    #[error("line {line}: malformed corner '{corner}', expected v/vt/vn")]
    MalformedCorner { line: usize, corner: String },

    #[error("line {line}: {attribute} index {index} out of range ({len} defined so far)")]
    IndexOutOfRange {
        line: usize,
        attribute: Attribute,
        /// Index as written in the file (1-based).
        index: usize,
        len: usize,
    },

    #[error("failed to read OBJ source{}", path_suffix(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}

impl ObjError {
    /// Source line the error was raised on, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            ObjError::InvalidNumber { line, .. }
            | ObjError::MalformedCorner { line, .. }
            | ObjError::IndexOutOfRange { line, .. } => Some(*line),
            ObjError::Io { .. } => None,
        }
    }
}

pub type ObjResult<T> = Result<T, ObjError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_line_numbers() {
        let err = ObjError::IndexOutOfRange {
            line: 7,
            attribute: Attribute::Normal,
            index: 4,
            len: 2,
        };
        assert_eq!(err.line(), Some(7));
        assert_eq!(
            err.to_string(),
            "line 7: normal index 4 out of range (2 defined so far)"
        );
    }

    #[test]
    fn io_error_mentions_path() {
        let err = ObjError::Io {
            path: Some(PathBuf::from("meshes/missing.obj")),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "failed to read OBJ source meshes/missing.obj");
    }
}
