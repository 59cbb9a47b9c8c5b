//! Errors raised while building the index or parsing a query.
//!
//! Unknown terms are not errors: a term missing from the index simply
//! contributes nothing to a search.

use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The document has no tokens left after stop-word removal, so its
    /// term frequencies would have a zero denominator.
    #[error("document {id} has no indexable terms after stop-word removal")]
    InvalidDocument { id: DocId },

    /// The id was already used by an earlier insertion.
    #[error("document id {id} was already inserted")]
    DuplicateId { id: DocId },

    /// A query token that consists only of the exclusion marker.
    #[error("query token {token:?} has no term after the exclusion marker")]
    InvalidQuery { token: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
