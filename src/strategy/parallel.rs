//! Parallel Suggestion Evaluation
//!
//! Uses Rayon to evaluate many independent requests against one engine.
//! The engine is immutable once shared, so no locking is needed.

use rayon::prelude::*;

use crate::complete::{Autocomplete, Completion};

/// Evaluate multiple texts in parallel; results keep the input order
pub fn suggest_parallel(engine: &Autocomplete, texts: &[&str]) -> Vec<Completion> {
    texts.par_iter().map(|text| engine.suggest(text)).collect()
}

/// Evaluate texts in parallel and map each completion
pub fn suggest_map<F, T>(engine: &Autocomplete, texts: &[&str], mapper: F) -> Vec<T>
where
    F: Fn(&str, Completion) -> T + Sync + Send,
    T: Send,
{
    texts
        .par_iter()
        .map(|text| mapper(text, engine.suggest(text)))
        .collect()
}
