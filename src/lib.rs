pub mod inference;
pub mod integration;
pub mod messages;
pub mod phases;
pub mod speech;
pub mod timing;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HablaError {
    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for HablaError {
    fn from(e: std::io::Error) -> Self {
        HablaError::IOError(e.to_string())
    }
}

impl HablaError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Transient; the submission flow falls back to a fixed reply
            HablaError::InferenceError(_) => true,
            // The prompt can simply be rephrased
            HablaError::InvalidPrompt(_) => true,
            HablaError::ConfigError(_) => false,
            HablaError::ChannelError(_) => false,
            HablaError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            HablaError::InferenceError(_) => {
                "Ocurrió un error. Inténtalo de nuevo.".to_string()
            }
            HablaError::InvalidPrompt(_) => {
                "Tu mensaje es demasiado corto. Escribe al menos cinco caracteres.".to_string()
            }
            HablaError::ConfigError(_) => {
                "Error de configuración. Revisa los ajustes.".to_string()
            }
            HablaError::ChannelError(_) => {
                "Error de comunicación interna. Reinicia la aplicación.".to_string()
            }
            HablaError::IOError(_) => {
                "Ocurrió un error del sistema de archivos.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HablaError>;
