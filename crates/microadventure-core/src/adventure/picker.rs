use rand::Rng;

use crate::error::{CoreError, Result};

/// Shown in place of a prompt when there is nothing to pick from.
pub const FALLBACK_MESSAGE: &str = "No adventures found!";

/// Pick a prompt uniformly at random using the thread RNG.
///
/// # Errors
/// Returns [`CoreError::NoContentAvailable`] when `prompts` is empty.
pub fn pick<S>(prompts: &[S]) -> Result<&S> {
    pick_with(prompts, &mut rand::thread_rng())
}

/// Pick a prompt uniformly at random from `[0, len)` using `rng`.
pub fn pick_with<'a, S, R>(prompts: &'a [S], rng: &mut R) -> Result<&'a S>
where
    R: Rng + ?Sized,
{
    if prompts.is_empty() {
        return Err(CoreError::NoContentAvailable);
    }
    let idx = rng.gen_range(0..prompts.len());
    Ok(&prompts[idx])
}
