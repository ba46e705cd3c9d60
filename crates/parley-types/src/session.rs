//! Session phase and turn outcome types.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Where the session is in the per-turn `Idle -> Pending -> Idle` cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    /// A reply is awaited; new submissions are refused.
    Pending,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Pending => write!(f, "pending"),
        }
    }
}

/// How a submitted turn resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// A bot message was appended and the log persisted.
    Replied { reply: String },
    /// The generic error message was appended; nothing was persisted.
    Failed { error: String },
}

impl TurnOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, TurnOutcome::Replied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_phase_default() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
        assert_eq!(SessionPhase::Pending.to_string(), "pending");
    }

    #[test]
    fn test_turn_outcome_serde() {
        let outcome = TurnOutcome::Replied {
            reply: "hi there".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"outcome":"replied","reply":"hi there"}"#);
        assert!(outcome.is_replied());

        let failed = TurnOutcome::Failed {
            error: "HTTP 500: boom".to_string(),
        };
        assert!(!failed.is_replied());
    }
}
