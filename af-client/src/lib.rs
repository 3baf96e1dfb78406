//! Client for the REST APIs behind the AF management console
//!
//! - AF API: traffic influence subscriptions and PFD management transactions
//! - 5G OAM API: AF service registration
//! - CUPS API: user-plane functions
//!
//! PFD transactions travel in the wire form. The form workflows
//! ([`AfClient::fetch_transaction_form`], [`AfClient::submit_transaction_form`]
//! and their per-application variants) convert to and from the UI form with
//! the `pfd` crate so that callers never handle both shapes.

pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod types;

mod client;
mod services;
mod subscriptions;
mod transactions;
mod userplanes;

#[cfg(test)]
mod testutils;

pub use client::{AfClient, Created};
pub use config::ApiConfig;
pub use errors::{ClientError, Result};
pub use services::created_service_id;
pub use types::{LocationService, Service, Subscription, Userplane};
