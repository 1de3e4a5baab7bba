use thiserror::Error;

/// Errors raised while rendering a circuit to OpenQASM 2.0.
#[derive(Error, Debug)]
pub enum QasmError {
    /// A gate or qubit count fell outside what OpenQASM 2.0 can express.
    #[error("emit error: {0}")]
    EmitError(String),

    /// An underlying core error (construction, IO) propagated through.
    #[error("QNS error: {0}")]
    QnsError(#[from] qns_core::QnsError),
}

pub type Result<T> = std::result::Result<T, QasmError>;
