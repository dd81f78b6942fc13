//! Match requests and their results.

use serde::{Deserialize, Serialize};

/// One requested match.
///
/// Equal specs are interchangeable; an experiment asks for a spec some
/// number of times and the scheduler counts how many have run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpec {
    pub experiment_name: String,
    pub game_id: String,
    /// One strategy id per role, in role order.
    pub strategy_ids: Vec<String>,
}

impl MatchSpec {
    pub fn new(
        experiment_name: impl Into<String>,
        game_id: impl Into<String>,
        strategy_ids: Vec<String>,
    ) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            game_id: game_id.into(),
            strategy_ids,
        }
    }
}

/// Everything recorded about one executed match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub spec: MatchSpec,

    /// Seed words the match was played with.
    pub seed: Vec<u32>,

    pub had_error: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_string: Option<String>,

    /// Outcome per role; absent when the match errored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<Vec<f64>>,

    /// Move names per ply, one per role.
    pub move_history: Vec<Vec<String>>,

    pub milliseconds_elapsed: u64,
}

impl MatchResult {
    /// A match that reached a terminal state.
    pub fn success(
        spec: MatchSpec,
        seed: Vec<u32>,
        outcomes: Vec<f64>,
        move_history: Vec<Vec<String>>,
        milliseconds_elapsed: u64,
    ) -> Self {
        Self {
            spec,
            seed,
            had_error: false,
            error_string: None,
            outcomes: Some(outcomes),
            move_history,
            milliseconds_elapsed,
        }
    }

    /// A match that failed part way; the history covers the plies played.
    pub fn failure(
        spec: MatchSpec,
        seed: Vec<u32>,
        error: impl Into<String>,
        move_history: Vec<Vec<String>>,
        milliseconds_elapsed: u64,
    ) -> Self {
        Self {
            spec,
            seed,
            had_error: true,
            error_string: Some(error.into()),
            outcomes: None,
            move_history,
            milliseconds_elapsed,
        }
    }

    /// Outcome for one role, if the match finished.
    #[must_use]
    pub fn outcome(&self, role: usize) -> Option<f64> {
        self.outcomes.as_ref().and_then(|o| o.get(role).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MatchSpec {
        MatchSpec::new("exp", "TIC_TAC_TOE", vec!["Random".into(), "Random".into()])
    }

    #[test]
    fn test_spec_json_field_names() {
        let json = serde_json::to_value(spec()).unwrap();
        assert_eq!(json["experimentName"], "exp");
        assert_eq!(json["gameId"], "TIC_TAC_TOE");
        assert_eq!(json["strategyIds"][1], "Random");
    }

    #[test]
    fn test_failure_omits_outcomes() {
        let result = MatchResult::failure(spec(), vec![1, 2, 3, 4], "boom", vec![], 5);
        let line = serde_json::to_string(&result).unwrap();
        assert!(line.contains("\"hadError\":true"));
        assert!(line.contains("\"errorString\":\"boom\""));
        assert!(!line.contains("outcomes"));

        let back: MatchResult = serde_json::from_str(&line).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.outcome(0), None);
    }

    #[test]
    fn test_success_outcomes() {
        let history = vec![vec!["( mark 1 1 )".to_string(), "noop".to_string()]];
        let result = MatchResult::success(spec(), vec![0; 4], vec![1.0, 0.0], history, 3);
        assert!(!result.had_error);
        assert_eq!(result.outcome(0), Some(1.0));
        assert_eq!(result.outcome(2), None);
    }
}
