use rand::seq::index;
use rand::Rng;

use crate::error::{Result, TyperError};

/// Draw `count` distinct words uniformly without replacement.
/// The returned order is the draw order.
pub fn sample<R: Rng + ?Sized>(
    corpus: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    if count > corpus.len() {
        return Err(TyperError::InsufficientCorpus {
            requested: count,
            available: corpus.len(),
        });
    }

    let picked = index::sample(rng, corpus.len(), count);
    Ok(picked.into_iter().map(|i| corpus[i].clone()).collect())
}
