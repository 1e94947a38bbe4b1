use crashsim_core::ConfigError;
use crashsim_ports::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("Cannot start: no valid multipliers loaded")]
    EmptySequence,

    #[error("Configuration cannot be edited while running")]
    EditWhileRunning,

    #[error("Reset is only permitted while stopped")]
    ResetWhileRunning,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Settlement error: {0}")]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, DriverError>;
