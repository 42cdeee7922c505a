pub mod schema;

pub use ::migrations::{connect, connect_in_memory, run_all as migrate};
pub use sqlx;

#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
    #[error("row not found")]
    RowNotFound,
    #[error("sql error: {0}")]
    Other(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::RowNotFound,
            other => DatabaseError::Other(other),
        }
    }
}

pub trait SqlxResultExt<T> {
    fn map_database_error(self) -> Result<T, DatabaseError>;
}

impl<T> SqlxResultExt<T> for sqlx::Result<T> {
    fn map_database_error(self) -> Result<T, DatabaseError> {
        self.map_err(DatabaseError::from)
    }
}
