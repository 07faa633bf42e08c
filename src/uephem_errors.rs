use camino::Utf8PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, UephemError>;

#[derive(Error, Debug)]
pub enum UephemError {
    #[error("file open failed: {path}: {source}")]
    FileOpen {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file read failed: {context}")]
    FileRead {
        context: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("bad argument: {0}")]
    InvalidArgument(String),

    #[error("item not found: {item_id} ({reason})")]
    ItemNotFound { item_id: i64, reason: &'static str },

    #[error("date out of range: JD {jd} is outside [{start}, {end}]")]
    DateOutOfRange { jd: f64, start: f64, end: f64 },
}

/// Category of a [`UephemError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileOpen,
    FileRead,
    InvalidArgument,
    ItemNotFound,
    DateOutOfRange,
}

impl UephemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UephemError::FileOpen { .. } => ErrorKind::FileOpen,
            UephemError::FileRead { .. } => ErrorKind::FileRead,
            UephemError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            UephemError::ItemNotFound { .. } => ErrorKind::ItemNotFound,
            UephemError::DateOutOfRange { .. } => ErrorKind::DateOutOfRange,
        }
    }

    /// Wrap an I/O failure that happened while reading `context`.
    pub(crate) fn read(context: impl Into<String>, source: std::io::Error) -> Self {
        UephemError::FileRead {
            context: context.into(),
            source: Some(source),
        }
    }

    /// Report structurally invalid file content.
    pub(crate) fn corrupt(context: impl Into<String>) -> Self {
        UephemError::FileRead {
            context: context.into(),
            source: None,
        }
    }
}

impl PartialEq for UephemError {
    fn eq(&self, other: &Self) -> bool {
        use UephemError::*;
        match (self, other) {
            // io::Error is not comparable: same path is enough
            (FileOpen { path: a, .. }, FileOpen { path: b, .. }) => a == b,
            (FileRead { context: a, .. }, FileRead { context: b, .. }) => a == b,
            (InvalidArgument(a), InvalidArgument(b)) => a == b,
            (
                ItemNotFound {
                    item_id: a,
                    reason: ra,
                },
                ItemNotFound {
                    item_id: b,
                    reason: rb,
                },
            ) => a == b && ra == rb,
            (
                DateOutOfRange {
                    jd: a,
                    start: sa,
                    end: ea,
                },
                DateOutOfRange {
                    jd: b,
                    start: sb,
                    end: eb,
                },
            ) => a == b && sa == sb && ea == eb,
            _ => false,
        }
    }
}
