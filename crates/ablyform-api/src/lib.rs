// ablyform-api: Async Rust client for the Ably Control API.

pub mod account;
pub mod apps;
pub mod client;
pub mod error;
pub mod keys;
pub mod models;
pub mod namespaces;
pub mod queues;
pub mod rules;
pub mod transport;

pub use client::{ControlClient, DEFAULT_API_URL};
pub use error::Error;
pub use transport::TransportConfig;
