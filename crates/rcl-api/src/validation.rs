use crate::error::ApiError;

/// Longest accepted deck name; matches the VARCHAR(255) column.
const MAX_DECK_NAME_LEN: usize = 255;

/// Validate a deck name: non-empty after trimming and within column bounds.
pub fn validate_deck_name(name: &str) -> Result<(), ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("Deck name cannot be empty".to_string()));
    }
    if trimmed.len() > MAX_DECK_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "Deck name cannot exceed {MAX_DECK_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate incoming card content.
///
/// Question and answer must be non-empty. Multiple-choice options and the
/// correct index must be present together, with the index in bounds; a choice
/// list needs at least two entries to be a choice at all.
pub fn validate_card_content(
    question: &str,
    answer: &str,
    options: Option<&[String]>,
    correct_index: Option<usize>,
) -> Result<(), ApiError> {
    if question.trim().is_empty() {
        return Err(ApiError::Validation(
            "Card question cannot be empty".to_string(),
        ));
    }
    if answer.trim().is_empty() {
        return Err(ApiError::Validation(
            "Card answer cannot be empty".to_string(),
        ));
    }

    match (options, correct_index) {
        (None, None) => Ok(()),
        (Some(options), Some(correct_index)) => {
            if options.len() < 2 {
                return Err(ApiError::Validation(
                    "Multiple-choice cards need at least two options".to_string(),
                ));
            }
            if correct_index >= options.len() {
                return Err(ApiError::Validation(format!(
                    "correctIndex {} is out of bounds for {} options",
                    correct_index,
                    options.len()
                )));
            }
            Ok(())
        }
        _ => Err(ApiError::Validation(
            "options and correctIndex must be provided together".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_deck_name() {
        assert!(validate_deck_name("Spanish Basics").is_ok());
        assert!(validate_deck_name("").is_err());
        assert!(validate_deck_name("   ").is_err());
        assert!(validate_deck_name(&"x".repeat(256)).is_err());
        assert!(validate_deck_name(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_card_content() {
        assert!(validate_card_content("Q", "A", None, None).is_ok());
        assert!(validate_card_content("", "A", None, None).is_err());
        assert!(validate_card_content("Q", " ", None, None).is_err());

        let options = vec!["a".to_string(), "b".to_string()];
        assert!(validate_card_content("Q", "A", Some(&options), Some(1)).is_ok());
        assert!(validate_card_content("Q", "A", Some(&options), Some(2)).is_err());
        assert!(validate_card_content("Q", "A", Some(&options), None).is_err());
        assert!(validate_card_content("Q", "A", None, Some(0)).is_err());

        let single = vec!["a".to_string()];
        assert!(validate_card_content("Q", "A", Some(&single), Some(0)).is_err());
    }
}
