//! Adventure prompts: the built-in catalog and uniform random selection.

mod catalog;
mod picker;

pub use catalog::{load_prompts, parse_prompts, DEFAULT_ADVENTURES};
pub use picker::{pick, pick_with, FALLBACK_MESSAGE};
