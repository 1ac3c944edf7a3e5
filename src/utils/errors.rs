use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, WindError>;
