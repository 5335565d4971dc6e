//! Validation result types

use std::fmt;

/// Kind of untrusted field being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    AccountId,
    Email,
    Password,
    Url,
    Title,
    Comment,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::AccountId => "Id",
            FieldKind::Email => "Email",
            FieldKind::Password => "Password",
            FieldKind::Url => "URL",
            FieldKind::Title => "Title",
            FieldKind::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// An accepted value, sanitized where the field kind calls for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedField {
    pub kind: FieldKind,
    pub value: String,
}

impl ValidatedField {
    pub(crate) fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}
