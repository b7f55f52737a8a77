//! One `impl Client` block per resource family, one method per REST operation.

mod accounts;
mod assets;
mod content_key_policies;
mod encoding;
mod live_events;
mod streaming_endpoints;
mod streaming_locators;
mod subscriptions;
