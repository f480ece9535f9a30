use crate::types::category::Category;
use thiserror::Error;

/// Why a single document could not be flattened. Raised per document; the
/// rest of the batch is unaffected.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("{category} payload is not a JSON object")]
    NotAnObject { category: Category },

    #[error("required field '{path}' is missing from {category} payload")]
    MissingField {
        category: Category,
        path: &'static str,
    },

    #[error("{category} payload field '{path}' has the wrong shape")]
    Malformed {
        category: Category,
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
