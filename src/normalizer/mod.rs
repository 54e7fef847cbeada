//! Text Normalizer
//!
//! Turns raw file text into the tokens the map step records. Stateless; the map step
//! is the only caller.

pub mod tokenizer;

pub use tokenizer::{decode_lossy, normalize, tokens};
