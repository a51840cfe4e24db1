use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Invalid DE-9IM pattern: should be length 9, is [{0}]")]
    InvalidPattern(String),

    #[error("Invalid dimension symbol: {0}")]
    InvalidSymbol(char),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, TopologyError>;
