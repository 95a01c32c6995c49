//! Typed storage errors.
//!
//! Postgres reports constraint violations through SQLSTATE codes. They are
//! classified once, at the repository boundary, so callers branch on enum
//! variants instead of comparing code strings.

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A unique constraint rejected the write.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key constraint rejected the write.
    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// Any other driver or query failure.
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

/// Result alias for repository methods.
pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return DbError::UniqueViolation { constraint },
                Some(FOREIGN_KEY_VIOLATION) => return DbError::ForeignKeyViolation { constraint },
                _ => {}
            }
        }
        DbError::Sqlx(err)
    }
}

impl DbError {
    /// Whether this is a unique violation on the named constraint.
    pub fn is_unique_violation_of(&self, name: &str) -> bool {
        matches!(self, DbError::UniqueViolation { constraint } if constraint == name)
    }
}
