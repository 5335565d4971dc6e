//! Session management
//!
//! Bearer token issuance and authentication against an injected token store.

pub mod bearer;
pub mod clock;
pub mod issuer;
pub mod store;

pub use bearer::extract_bearer_token;
pub use clock::{Clock, SystemClock};
pub use issuer::{SessionIssuer, TOKEN_BYTES, TOKEN_TTL_MS, is_expired};
pub use store::{MemoryTokenStore, SessionRecord, TokenStore};
