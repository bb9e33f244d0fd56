//! Route computation between two coordinates.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{CandidateRoute, Coordinate};

use super::ProviderError;

/// Means of travel requested from a directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// Car travel on the road network.
    #[default]
    Automobile,
    /// Travel on foot.
    Walking,
    /// Public transport.
    Transit,
}

impl TransportMode {
    /// Return the mode as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Automobile => "automobile",
            Self::Walking => "walking",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single origin/destination directions lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    /// Start of the route.
    pub origin: Coordinate,
    /// End of the route.
    pub destination: Coordinate,
    /// Whether the provider may return more than one candidate.
    pub allow_alternates: bool,
    /// Requested means of travel.
    pub transport_mode: TransportMode,
}

/// Compute candidate routes between two coordinates.
///
/// Implementations return every candidate the service offers; choosing
/// between them is the caller's concern. An empty vector means no route
/// exists.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Return candidate routes for `request`.
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError>;
}

#[async_trait]
impl<T> DirectionsProvider for Arc<T>
where
    T: DirectionsProvider + ?Sized,
{
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        (**self).route(request).await
    }
}
