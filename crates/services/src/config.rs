use quiz_core::RankTable;
use serde::{Deserialize, Serialize};

/// What happens when an option is picked for a question that already has an
/// answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReselectPolicy {
    /// Overwrite the recorded answer. The score is never touched again.
    #[default]
    Rerecord,
    /// Refuse with `SessionError::InvalidState`.
    Reject,
}

/// Tunables for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub reselect: ReselectPolicy,
    pub ranks: RankTable,
}

impl SessionConfig {
    #[must_use]
    pub fn with_reselect(mut self, reselect: ReselectPolicy) -> Self {
        self.reselect = reselect;
        self
    }

    #[must_use]
    pub fn with_ranks(mut self, ranks: RankTable) -> Self {
        self.ranks = ranks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rerecords_with_newsletter_ranks() {
        let config = SessionConfig::default();
        assert_eq!(config.reselect, ReselectPolicy::Rerecord);
        assert_eq!(config.ranks, RankTable::newsletter());
    }

    #[test]
    fn builders_override_fields() {
        let config = SessionConfig::default()
            .with_reselect(ReselectPolicy::Reject)
            .with_ranks(RankTable::proportional());
        assert_eq!(config.reselect, ReselectPolicy::Reject);
        assert_eq!(config.ranks, RankTable::proportional());
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{
            "reselect": "reject",
            "ranks": { "kind": "absolute", "middle": 1, "upper": 2, "top": 3 }
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.reselect, ReselectPolicy::Reject);
        assert_eq!(config.ranks.absolute_top(), Some(3));
    }
}
