//! Response body composition
//!
//! Objects are built by concatenating already-encoded members. There is no
//! array or nested-object support beyond splicing in hand-assembled text.

use crate::wire::codec::encode;
use crate::wire::values::WireValue;

/// Success status codes
pub const OK: u16 = 200;
pub const CREATED: u16 = 201;

/// Builds a flat `{...}` object one member at a time
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    members: Vec<String>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar member
    pub fn field(self, key: &str, value: impl Into<WireValue>) -> Self {
        let encoded = value.into().encode();
        self.raw(key, encoded)
    }

    /// Add a member whose value is already wire text, e.g. a hand-built array
    pub fn raw(mut self, key: &str, encoded: impl Into<String>) -> Self {
        self.members
            .push(format!("{}:{}", encode(key), encoded.into()));
        self
    }

    pub fn finish(self) -> String {
        format!("{{{}}}", self.members.join(","))
    }
}

/// Start a success envelope, `{"ok":true,...}`
pub fn ok_object() -> ObjectBuilder {
    ObjectBuilder::new().field("ok", true)
}

/// Failure envelope, `{"ok":false,"error":"..."}`
pub fn error_body(message: &str) -> String {
    ObjectBuilder::new()
        .field("ok", false)
        .field("error", message)
        .finish()
}
