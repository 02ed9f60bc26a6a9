// src/error.rs
//! Ошибки генерации и загрузки конфигурации

use thiserror::Error;

/// Параметры, с которыми генерация не начинается
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}

/// Ошибки чтения TOML-конфигурации
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] GenerationError),
}
