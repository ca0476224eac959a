use directory::database::DatabaseError;

pub mod cafe;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    DatabaseError::Other(Box::new(why))
}
