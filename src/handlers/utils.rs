use crate::database::DatabaseError;
use crate::types::DocumentId;

/// Parse a path id. A malformed id is a store failure, not an absent record.
pub fn parse_document_id(raw: &str) -> Result<DocumentId, DatabaseError> {
    raw.parse()
        .map_err(|_| DatabaseError::MalformedId(raw.to_string()))
}
