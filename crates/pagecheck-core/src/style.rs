//! Computed style predicates.

use pagecheck_protocols::{CheckError, Element};

/// Computed value of pure white as browsers serialize it.
pub const WHITE: &str = "rgb(255, 255, 255)";

/// Both the text and its background are pure white.
pub fn is_white_on_white(background: &str, color: &str) -> bool {
    background.trim() == WHITE && color.trim() == WHITE
}

/// Text cannot be selected with the pointer.
pub fn is_selection_disabled(user_select: &str) -> bool {
    user_select.trim() == "none"
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Resolved `user-select` of an element.
///
/// Some engines only resolve the prefixed property.
pub async fn user_select(element: &dyn Element) -> Result<String, CheckError> {
    let value = element.computed_style("user-select").await?;
    if !value.trim().is_empty() {
        return Ok(value);
    }
    element.computed_style("-webkit-user-select").await
}
