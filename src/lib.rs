//! # Media Services client for Rust
//!
//! Async client for the media services management REST API: accounts,
//! assets, transforms and jobs, live events, streaming endpoints, streaming
//! locators and content key policies. Each REST operation is one method on
//! [`Client`]; arguments are checked locally before anything is sent.
//!
//! ## Quick start
//!
//! ```no_run
//! use mediaservices::{Client, EncoderNamedPreset, Job, JobInput, JobOutput, JobProperties,
//!     Preset, Transform, TransformOutput, TransformProperties};
//!
//! #[tokio::main]
//! async fn main() -> mediaservices::Result<()> {
//!     let client = Client::new("00000000-0000-0000-0000-000000000000", "eyJ0eXAi...")?;
//!
//!     let transform = Transform::new(TransformProperties {
//!         outputs: vec![TransformOutput::new(Preset::built_in(
//!             EncoderNamedPreset::AdaptiveStreaming,
//!         ))],
//!         ..Default::default()
//!     });
//!     client
//!         .create_or_update_transform("media-rg", "contosomedia", "adaptive", &transform)
//!         .await?;
//!
//!     let job = Job::new(JobProperties::new(
//!         JobInput::asset("input"),
//!         vec![JobOutput::asset("output")],
//!     ));
//!     client
//!         .create_job("media-rg", "contosomedia", "adaptive", "job-1", &job)
//!         .await?;
//!
//!     // Poll until the job settles
//!     let done = client
//!         .wait_for_job("media-rg", "contosomedia", "adaptive", "job-1", None)
//!         .await?;
//!     println!("finished at {:?}", done.properties.end_time);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Long-running operations
//!
//! Live event, streaming endpoint and account mutations return only once the
//! service reports the operation settled. The poll interval and give-up time
//! are set on [`ClientBuilder`].
//!
//! ## Paging
//!
//! ```no_run
//! # async fn example(client: mediaservices::Client) -> mediaservices::Result<()> {
//! use mediaservices::ListOptions;
//!
//! let opts = ListOptions::new().orderby("properties.created desc").top(100);
//! let first = client.list_assets("media-rg", "contosomedia", Some(&opts)).await?;
//! let all = client.collect_all(first).await?;
//! println!("{} assets", all.len());
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod errors;
mod lro;
pub mod models;
mod paging;
pub mod validation;

pub use client::{Client, ClientBuilder};
pub use errors::{ErrorDetail, MediaError, Result};
pub use lro::{OperationState, OperationStatus, PollOptions};
pub use models::*;
pub use paging::{ListOptions, Page};
