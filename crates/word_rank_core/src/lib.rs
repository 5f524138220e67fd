//! Word ranking domain primitives.
//!
//! This crate owns the request/response contract, tokenization, frequency
//! counting, and top-N ranking. It excludes AWS SDK and Lambda runtime
//! concerns, which live in `word_rank_lambda`.

pub mod contract;
pub mod frequency;
pub mod storage;
