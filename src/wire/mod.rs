//! Wire codec
//!
//! Flat key/value text format used by every request and response body.

pub mod body;
pub mod codec;
pub mod responses;
pub mod values;

pub use body::{read_body, read_body_from};
pub use codec::{decode, encode, encode_optional};
pub use responses::{CREATED, OK, ObjectBuilder, error_body, ok_object};
pub use values::{WireObject, WireValue, parse_bool, parse_int};
