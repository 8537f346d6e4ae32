//! Evaluation Strategies
//!
//! - Sequential: [`Autocomplete::suggest`](crate::Autocomplete::suggest), one request at a time
//! - Parallel: many independent requests against one engine (rayon)

pub mod parallel;

pub use parallel::suggest_parallel;
