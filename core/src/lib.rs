pub mod error;
pub mod index;
pub mod query;
pub mod ranker;
pub mod stopwords;
pub mod tokenizer;

pub type DocId = u32;
pub type Term = String;

pub use error::{EngineError, Result};
pub use index::InvertedIndex;
pub use query::{ParsedQuery, MINUS_MARKER};
pub use ranker::{find_all_documents, find_top_documents, ScoredDocument, MAX_RESULT_DOCUMENT_COUNT};
pub use stopwords::StopWords;
pub use tokenizer::tokenize;
