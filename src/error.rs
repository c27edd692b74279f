use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stdout is not a terminal")]
    NotATerminal,

    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

pub type Result<T, E = FrontendError> = std::result::Result<T, E>;
