use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row answers to `id`. The id is kept as the client sent it, which
    /// may not even be a number.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<ValidationErrors> for CoreError {
    /// Collapse a set of field errors into a single client-facing message.
    ///
    /// Fields are visited in name order so the chosen message is stable when
    /// several fields fail at once.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());

        CoreError::Validation(message)
    }
}
