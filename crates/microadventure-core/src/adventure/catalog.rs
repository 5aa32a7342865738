//! Built-in adventure prompts and plain-text prompt files.

use std::path::Path;

use crate::error::Result;

/// Prompts used when no prompt file is configured.
pub const DEFAULT_ADVENTURES: [&str; 30] = [
    "Take a walk around the block without your phone.",
    "Find the oldest tree in your neighborhood.",
    "Eat lunch somewhere you've never eaten before.",
    "Watch the sunset from the highest point you can reach.",
    "Take a different route home today.",
    "Photograph five things that are the same color.",
    "Visit a shop you've walked past but never entered.",
    "Write a postcard to someone and actually mail it.",
    "Spend ten minutes sitting in a park just listening.",
    "Learn the name of a plant growing near your home.",
    "Cook a dish from a country you've never visited.",
    "Walk barefoot on grass for five minutes.",
    "Find a bench with a view and read for fifteen minutes.",
    "Ask a local for their favorite hidden spot nearby.",
    "Take the stairs all day, every time.",
    "Sketch the view from your window.",
    "Go stargazing and find one constellation.",
    "Try a fruit you've never tasted.",
    "Explore a street in your town you've never walked down.",
    "Leave a kind note for a stranger to find.",
    "Have breakfast outside.",
    "Take a photo of a sunrise.",
    "Walk to a nearby place you usually drive to.",
    "Find a body of water and skip a stone.",
    "Visit your local library and pick a random book.",
    "Climb a hill and look at your town from above.",
    "Spend an hour without any screens.",
    "Go for a walk in the rain.",
    "Collect three interesting leaves or stones.",
    "Say hello to a neighbor you've never spoken to.",
];

/// Parse a prompt list: one prompt per line, trimmed, skipping blank
/// lines and `#` comments.
pub fn parse_prompts(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read and parse a prompt file.
///
/// # Errors
/// Returns an IO error if the file cannot be read. An empty list is not an
/// error here; picking from it is.
pub fn load_prompts(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_prompts(&content))
}
