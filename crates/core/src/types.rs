use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse an id taken from a URL path.
///
/// Text that is not a valid id cannot name a row, so it is reported the same
/// way as an id with no row behind it.
pub fn parse_id(entity: &'static str, raw: &str) -> Result<DbId, CoreError> {
    raw.parse().map_err(|_| CoreError::NotFound {
        entity,
        id: raw.to_string(),
    })
}
