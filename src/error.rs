use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error(transparent)]
    Common(#[from] sentiment_common::Error),

    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Error: La entrada no puede estar vacía")]
    EmptyInput,

    #[error("Error: El archivo '{0}' no existe")]
    FileNotFound(String),

    #[error("Error: '{0}' no es un archivo válido")]
    NotAFile(String),

    #[error("Error: No se puede leer el archivo '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Selección inválida: {0}")]
    InvalidSelection(String),

    #[error("Error guardando el historial: {0}")]
    History(String),

    #[error("Error de entrada: {0}")]
    Prompt(String),

    #[error("Error JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for DetectorError {
    fn from(e: dialoguer::Error) -> Self {
        DetectorError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
