use sqlx::error::ErrorKind;

/// Crate-wide error type. Each request maps one of these to a user-visible
/// notice at the handler boundary; none of them is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lookup by id returned no row.
    #[error("registro no encontrado")]
    NotFound,

    /// The storage engine rejected a write (unique, foreign-key or
    /// not-null violation). Carries the engine's message text.
    #[error("restricción violada: {0}")]
    Constraint(String),

    /// A required form field was missing or blank.
    #[error("{0}")]
    Validation(String),

    #[error("error de base de datos: {0}")]
    Database(sqlx::Error),

    #[error("error de plantilla: {0}")]
    Template(#[from] tera::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound,
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Error::Constraint(db.message().to_string()),
                _ => Error::Database(sqlx::Error::Database(db)),
            },
            other => Error::Database(other),
        }
    }
}

impl Error {
    pub fn validation(msg: &str) -> Self {
        Error::Validation(msg.to_string())
    }
}
