//! Directions providers backed by OSRM routing services.
//!
//! [`OsrmDirectionsProvider`] implements [`waypath_core::DirectionsProvider`]
//! over the OSRM Route API, returning every route OSRM offers as a
//! candidate.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use waypath_data::routing::{OsrmDirectionsProvider, OsrmDirectionsProviderConfig};
//!
//! let config = OsrmDirectionsProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let provider = OsrmDirectionsProvider::with_config(config)?;
//! # Ok::<(), waypath_data::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_USER_AGENT, OsrmDirectionsProvider, OsrmDirectionsProviderConfig};
