//! Recommendation flow state machine
//!
//! ```text
//! Idle -> LocationEntered -> FetchingEnvironment -> RecommendationsReady
//!                                     \-> FetchError -> RecommendationsReady
//! ```
//!
//! There is no terminal failure state: `FetchError` always carries the
//! fallback defaults and leads on to `RecommendationsReady`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    LocationEntered,
    FetchingEnvironment,
    FetchError { fallback_defaults_applied: bool },
    RecommendationsReady,
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowState::Idle => write!(f, "idle"),
            FlowState::LocationEntered => write!(f, "locationEntered"),
            FlowState::FetchingEnvironment => write!(f, "fetchingEnvironment"),
            FlowState::FetchError { .. } => write!(f, "fetchError"),
            FlowState::RecommendationsReady => write!(f, "recommendationsReady"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    EnterLocation,
    StartFetch,
    EnvironmentLoaded,
    FetchFailed,
    Reset,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid transition from {from} on {event:?}")]
pub struct InvalidTransition {
    pub from: FlowState,
    pub event: FlowEvent,
}

/// Tracks the current state and every state visited so far
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationFlow {
    state: FlowState,
    trail: Vec<FlowState>,
}

impl Default for RecommendationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            trail: vec![FlowState::Idle],
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn trail(&self) -> &[FlowState] {
        &self.trail
    }

    /// Whether defaults were substituted at any point
    pub fn used_fallback(&self) -> bool {
        self.trail
            .iter()
            .any(|s| matches!(s, FlowState::FetchError { .. }))
    }

    pub fn apply(&mut self, event: FlowEvent) -> Result<FlowState, InvalidTransition> {
        use FlowEvent::*;
        use FlowState::*;

        let next = match (self.state, event) {
            (_, Reset) => Idle,
            (Idle, EnterLocation) | (RecommendationsReady, EnterLocation) => LocationEntered,
            (LocationEntered, StartFetch) => FetchingEnvironment,
            (FetchingEnvironment, EnvironmentLoaded) => RecommendationsReady,
            (FetchingEnvironment, FetchFailed) => FetchError {
                fallback_defaults_applied: true,
            },
            (FetchError { .. }, EnvironmentLoaded) => RecommendationsReady,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        if next == Idle {
            self.trail.clear();
        }
        self.state = next;
        self.trail.push(next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut flow = RecommendationFlow::new();
        flow.apply(FlowEvent::EnterLocation).unwrap();
        flow.apply(FlowEvent::StartFetch).unwrap();
        let end = flow.apply(FlowEvent::EnvironmentLoaded).unwrap();
        assert_eq!(end, FlowState::RecommendationsReady);
        assert_eq!(flow.trail().len(), 4);
        assert!(!flow.used_fallback());
    }

    #[test]
    fn test_fetch_error_recovers() {
        let mut flow = RecommendationFlow::new();
        flow.apply(FlowEvent::EnterLocation).unwrap();
        flow.apply(FlowEvent::StartFetch).unwrap();
        let err = flow.apply(FlowEvent::FetchFailed).unwrap();
        assert_eq!(
            err,
            FlowState::FetchError {
                fallback_defaults_applied: true
            }
        );
        assert_eq!(
            flow.apply(FlowEvent::EnvironmentLoaded).unwrap(),
            FlowState::RecommendationsReady
        );
        assert!(flow.used_fallback());
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let mut flow = RecommendationFlow::new();
        let err = flow.apply(FlowEvent::EnvironmentLoaded).unwrap_err();
        assert_eq!(err.from, FlowState::Idle);
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut flow = RecommendationFlow::new();
        flow.apply(FlowEvent::EnterLocation).unwrap();
        flow.apply(FlowEvent::Reset).unwrap();
        assert_eq!(flow.state(), FlowState::Idle);
        assert_eq!(flow.trail(), &[FlowState::Idle]);
    }

    #[test]
    fn test_state_wire_format() {
        let json = serde_json::to_string(&FlowState::FetchError {
            fallback_defaults_applied: true,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"state":"fetch_error","fallback_defaults_applied":true}"#
        );
    }
}
