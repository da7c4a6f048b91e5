//! quantpro-rank
//!
//! In-memory BM25 ranking over a small, fixed collection of documents. See
//! `tokenizer` for how text becomes terms, `index` for the collection
//! statistics and `engine` for query scoring.
pub mod tokenizer;
pub mod index;
pub mod engine;

pub use engine::{Bm25Engine, Bm25Params};
pub use index::Bm25Index;
pub use tokenizer::{tokenize, Tokens};
