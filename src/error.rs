use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("unknown command target '{0}'")]
    UnknownTarget(String),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("empty command text")]
    Empty,
    #[error("malformed parameter list: {0}")]
    Malformed(String),
    #[error("parameter {name} has non-numeric value '{value}'")]
    NotNumeric { name: String, value: String },
    #[error("parameter {name} value {value} is out of range")]
    OutOfRange { name: String, value: i64 },
    #[error("unknown parameter {0}")]
    UnknownParameter(String),
    #[error("parameter {0} given more than once")]
    DuplicateParameter(String),
    #[error("missing parameter {0}")]
    MissingParameter(&'static str),
    #[error("ID {given} does not match command {command} (expected {expected})")]
    IdMismatch {
        command: String,
        given: u8,
        expected: u8,
    },
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("no Bluetooth adapter found")]
    NoAdapter,
    #[error("peripheral '{0}' not found")]
    NotFound(String),
    #[error("communication characteristic not found")]
    NoCharacteristic,
    #[error("bluetooth error: {0}")]
    Bluetooth(#[from] btleplug::Error),
    #[error("invalid packet: {0}")]
    Packet(#[from] PacketError),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("field override '{0}' must look like NAME=VALUE")]
    BadOverride(String),
}
