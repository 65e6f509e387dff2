use thiserror::Error;

/// Errors surfaced by the chain-facing clients.
///
/// The participation loop treats [`ChainError::Transient`] failures as
/// survivable: they are logged at the tick boundary and never terminate
/// the loop.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A network or RPC call failed in a way that is expected to clear on
    /// its own (timeout, connection refused, transient 5xx).
    #[error("transient chain error: {0}")]
    Transient(String),

    /// The remote endpoint answered but the payload could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The chain deliberately refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChainError {
    /// Whether retrying at the next natural cadence hit is reasonable.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChainError::Transient(_) | ChainError::Io(_))
    }
}
