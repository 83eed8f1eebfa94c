//! Wallet name rules.
//!
//! A name must be present, non-blank after trimming, at most [`MAX_NAME_LENGTH`]
//! characters, and made only of letters, ASCII digits and spaces. Combining
//! diacritics may follow a letter; each counts as one character toward the limit.

use serde::Serialize;

use crate::models::{CreateWalletRequest, NewWallet};

pub const MAX_NAME_LENGTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum Violation {
    #[error("name is required")]
    Missing,
    #[error("name must not be blank")]
    Blank,
    #[error("name must be at most {max} characters long (got {actual})")]
    TooLong { max: usize, actual: usize },
    #[error("name may only contain letters, digits and spaces (found {found:?})")]
    IllegalCharacters { found: String },
}

/// Every constraint a request violated, in check order.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid wallet request: {}", describe(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    fn single(violation: Violation) -> Self {
        Self { violations: vec![violation] }
    }
}

pub fn is_allowed_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == ' '
}

/// Combining diacritics, so decomposed accents ("e" + U+0301) are accepted after a letter.
pub fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

fn illegal_characters(name: &str) -> Vec<char> {
    let mut found: Vec<char> = Vec::new();
    let mut previous: Option<char> = None;
    for c in name.chars() {
        let allowed = is_allowed_char(c)
            || (is_combining_mark(c)
                && previous.is_some_and(|p| p.is_alphabetic() || is_combining_mark(p)));
        if !allowed && !found.contains(&c) {
            found.push(c);
        }
        previous = Some(c);
    }
    found
}

/// Check a raw name and return its trimmed form.
pub fn validate_wallet_name(name: Option<&str>) -> Result<String, ValidationError> {
    let name = name.ok_or_else(|| ValidationError::single(Violation::Missing))?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::single(Violation::Blank));
    }

    let mut violations = Vec::new();

    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        violations.push(Violation::TooLong {
            max: MAX_NAME_LENGTH,
            actual: length,
        });
    }

    let found = illegal_characters(trimmed);
    if !found.is_empty() {
        violations.push(Violation::IllegalCharacters {
            found: found.into_iter().collect(),
        });
    }

    if violations.is_empty() {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError { violations })
    }
}

impl CreateWalletRequest {
    pub fn validate(&self) -> Result<NewWallet, ValidationError> {
        validate_wallet_name(self.name.as_deref()).map(NewWallet::from_validated)
    }
}
