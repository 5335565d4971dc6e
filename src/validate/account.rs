//! Account field validation
//!
//! Checks applied to registration input before a credential is derived.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::validate::results::{FieldKind, ValidatedField};

/// Characters the password rule treats as special
pub const SPECIAL_CHARACTERS: &str = "!?@#$%&";

/// How the special-character requirement of a password is applied
///
/// `Literal` is the shipped behavior: after requiring an upper- and a
/// lower-case letter it also requires that *every* character be special,
/// which no password containing letters can satisfy. `AtLeastOneSpecial`
/// is the presumed intent and must be opted into explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    #[default]
    Literal,
    AtLeastOneSpecial,
}

pub fn validate_account_id(id: Option<&str>) -> Result<ValidatedField, ValidationError> {
    match id {
        Some(id) if !id.is_empty() => Ok(ValidatedField::new(FieldKind::AccountId, id)),
        _ => Err(ValidationError::Invalid(FieldKind::AccountId)),
    }
}

/// Syntactic check only: an `@` somewhere before the last `.`
pub fn validate_email(email: Option<&str>) -> Result<ValidatedField, ValidationError> {
    let email = match email {
        Some(e) if !e.is_empty() => e,
        _ => return Err(ValidationError::Invalid(FieldKind::Email)),
    };

    match (email.find('@'), email.rfind('.')) {
        (Some(at), Some(dot)) if at < dot => Ok(ValidatedField::new(FieldKind::Email, email)),
        _ => Err(ValidationError::Invalid(FieldKind::Email)),
    }
}

pub fn validate_password(
    password: Option<&str>,
    rule: PasswordRule,
) -> Result<ValidatedField, ValidationError> {
    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ValidationError::Invalid(FieldKind::Password)),
    };

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::MissingLowercase);
    }

    let special_ok = match rule {
        PasswordRule::Literal => password.chars().all(is_special),
        PasswordRule::AtLeastOneSpecial => password.chars().any(is_special),
    };
    if !special_ok {
        return Err(ValidationError::MissingSpecialCharacter);
    }

    Ok(ValidatedField::new(FieldKind::Password, password))
}

fn is_special(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(c)
}
