//! Request and response models, one module per resource family.
//!
//! Field names follow Rust conventions; serde maps them to the camelCase wire
//! names. Unset optional fields are left out of request bodies.

mod account;
mod asset;
mod common;
mod content_key_policy;
mod encoding;
mod live;
mod streaming;
mod subscription;

pub use account::*;
pub use asset::*;
pub use common::*;
pub use content_key_policy::*;
pub use encoding::*;
pub use live::*;
pub use streaming::*;
pub use subscription::*;
