#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlightError {
    AlreadyInFlight,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read card config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse card config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("countdown tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("invalid pool id {0:?} in lock schedule")]
    InvalidPoolId(String),
}
