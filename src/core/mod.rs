//! Core partial-XML reading primitives
//!
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: Never-failing state machine over in-progress text

pub mod scanner;
pub mod tokenizer;

pub use tokenizer::{ReaderState, Tokenizer};
