/// Errors produced while reporting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown style: '{0}'")]
    UnknownStyle(String),

    #[error("unknown color mode: '{0}' (expected auto, always or never)")]
    UnknownColorMode(String),

    #[error("cannot inspect frame {requested}: the stack is only {depth} frame(s) deep")]
    StackUnderflow { requested: usize, depth: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
