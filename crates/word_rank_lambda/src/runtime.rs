pub use word_rank_core::{contract, frequency, storage};
