//! Vault result types

/// Hex-encoded hash and salt produced by one derivation
///
/// The two values only exist together; store both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedCredential {
    hash_hex: String,
    salt_hex: String,
}

impl DerivedCredential {
    pub(crate) fn new(hash_hex: String, salt_hex: String) -> Self {
        Self { hash_hex, salt_hex }
    }

    pub fn hash_hex(&self) -> &str {
        &self.hash_hex
    }

    pub fn salt_hex(&self) -> &str {
        &self.salt_hex
    }

    /// Split into `(hash_hex, salt_hex)`
    pub fn into_parts(self) -> (String, String) {
        (self.hash_hex, self.salt_hex)
    }
}
