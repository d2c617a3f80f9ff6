use thiserror::Error;

/// Errors raised while reading a tile layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A character that does not name any tile type
    #[error("unknown tile '{symbol}' at line {line}, column {column}")]
    UnknownTile {
        line: usize,
        column: usize,
        symbol: char,
    },
    /// The layout contained no tiles at all
    #[error("layout contains no tiles")]
    Empty,
}

/// Errors raised while loading or validating a [`SimConfig`](crate::config::SimConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("evaporation rate must lie in [0, 1], got {0}")]
    InvalidEvaporationRate(f64),
    #[error("max nodes remembered must be at least 1")]
    InvalidMaxNodesRemembered,
    #[error("tile size must be finite and positive, got {0}")]
    InvalidTileSize(f64),
}

/// Umbrella error for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
