//! Invocation client for remote structure prediction functions.
//!
//! - [`config::ClientConfig`]: endpoints, credentials, timeouts and optional polling bounds
//! - [`invoke::InvocationClient`]: the submit-then-poll protocol
//!
//! ## Example
//!
//! ```rust,no_run
//! use fold_relay::client::{ClientConfig, InvocationClient};
//!
//! # async fn run() -> fold_relay::error::Result<()> {
//! let config = ClientConfig::new(std::env::var("NVIDIA_API_KEY").unwrap_or_default());
//! let client = InvocationClient::new(config)?;
//! let url = client.config().esmfold_url.clone();
//! let body = client
//!     .invoke("ESMFold", &url, &serde_json::json!({ "sequence": "MKTAYIAK" }))
//!     .await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod invoke;

pub use config::ClientConfig;
pub use invoke::InvocationClient;
