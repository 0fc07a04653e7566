//! Prompt contract applied at the inference boundary input

use crate::{HablaError, Result};

/// Minimum prompt length in characters.
pub const MIN_PROMPT_LEN: usize = 5;

/// Validate a prompt before it crosses the inference boundary: a non-empty
/// string of at least [`MIN_PROMPT_LEN`] characters.
pub fn validate_prompt(prompt: &str) -> Result<()> {
    let len = prompt.trim().chars().count();
    if len < MIN_PROMPT_LEN {
        return Err(HablaError::InvalidPrompt(format!(
            "prompt has {} characters, minimum is {}",
            len, MIN_PROMPT_LEN
        )));
    }
    Ok(())
}
