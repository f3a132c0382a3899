use thiserror::Error;

#[derive(Debug, Error)]
pub enum DossierError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("enrichment error: {0}")]
    Enrichment(String),
}

pub type DossierResult<T> = Result<T, DossierError>;
