use thiserror::Error;

/// Everything that can stop the kaleidoscope from starting or ticking.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("drawing surface call failed: {0}")]
    Surface(String),

    #[error("element not found: #{id}")]
    MissingElement { id: String },

    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("2d context unavailable")]
    ContextUnavailable,

    #[error("could not build a repeating pattern from #{id}")]
    PatternUnavailable { id: String },

    #[error("pattern images must be square and equal: base {base:?}, reflected {reflected:?}")]
    PatternMismatch {
        base: (u32, u32),
        reflected: (u32, u32),
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("tick requested before the driver was started")]
    NotStarted,

    #[error("driver already running")]
    AlreadyRunning,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
