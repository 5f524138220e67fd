pub mod top_words;
