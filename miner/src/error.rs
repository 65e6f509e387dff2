use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("chain error: {0}")]
    Chain(#[from] aegis_chain::ChainError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
