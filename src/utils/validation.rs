use anyhow::{anyhow, Result};

/// Bounds for the number guessing game.
pub const GUESS_MIN: u32 = 1;
pub const GUESS_MAX: u32 = 100;

/// Parses a number-guess input. Returns `None` for non-integer input or a
/// value outside [1, 100]; either way the caller re-prompts without
/// counting an attempt.
pub fn parse_guess(text: &str) -> Option<u32> {
    let guess: u32 = text.trim().parse().ok()?;
    if (GUESS_MIN..=GUESS_MAX).contains(&guess) {
        Some(guess)
    } else {
        None
    }
}

/// Parses a note or reminder id typed by the user.
pub fn parse_item_id(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

pub fn validate_note_title(title: &str) -> Result<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(anyhow!("Note title cannot be empty"));
    }
    if title.len() > 100 {
        return Err(anyhow!("Note title cannot be longer than 100 characters"));
    }

    Ok(title.to_string())
}

pub fn validate_reminder_text(text: &str) -> Result<String> {
    let text = text.trim();

    if text.is_empty() {
        return Err(anyhow!("Reminder text cannot be empty"));
    }
    if text.len() > 500 {
        return Err(anyhow!("Reminder text cannot be longer than 500 characters"));
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_guess_valid() {
        assert_eq!(parse_guess("50"), Some(50));
        assert_eq!(parse_guess("1"), Some(1));
        assert_eq!(parse_guess("100"), Some(100));
        assert_eq!(parse_guess("  42  "), Some(42));
    }

    #[test]
    fn test_parse_guess_out_of_range() {
        assert_eq!(parse_guess("0"), None);
        assert_eq!(parse_guess("101"), None);
        assert_eq!(parse_guess("-5"), None);
    }

    #[test]
    fn test_parse_guess_not_a_number() {
        assert_eq!(parse_guess("fifty"), None);
        assert_eq!(parse_guess(""), None);
        assert_eq!(parse_guess("4.2"), None);
    }

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("3"), Some(3));
        assert_eq!(parse_item_id(" 12 "), Some(12));
        assert_eq!(parse_item_id("abc"), None);
        assert_eq!(parse_item_id("-1"), None);
    }

    #[test]
    fn test_validate_note_title() {
        assert_eq!(validate_note_title("  Groceries  ").unwrap(), "Groceries");
        assert!(validate_note_title("").is_err());
        assert!(validate_note_title("   ").is_err());
        assert!(validate_note_title(&"a".repeat(101)).is_err());
        assert!(validate_note_title(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_reminder_text() {
        assert_eq!(validate_reminder_text("Buy milk").unwrap(), "Buy milk");
        assert!(validate_reminder_text("\t\n").is_err());
        assert!(validate_reminder_text(&"b".repeat(501)).is_err());
    }
}
