//! Itineraries returned by `/generate-plan`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trip plan produced by the backend.
///
/// The client treats it as opaque JSON; the current backend sends a Markdown
/// string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Itinerary(pub Value);

impl Itinerary {
    /// Returns the itinerary as text when the backend sent a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Renders the itinerary for display: strings verbatim, anything else as
    /// pretty-printed JSON.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.0 {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

impl From<Value> for Itinerary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Where the backend obtained the itinerary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlanSource {
    /// A similar cached plan was adapted to the request.
    CacheAdapted,
    /// The plan was generated from scratch.
    NewlyGenerated,
    /// Any source this client does not know about.
    #[serde(other)]
    Other,
}

/// Response from a successful `/generate-plan` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanResponse {
    /// The generated plan.
    pub itinerary: Itinerary,
    /// Origin of the plan, when the backend reports it.
    #[serde(default)]
    pub source: Option<PlanSource>,
}
