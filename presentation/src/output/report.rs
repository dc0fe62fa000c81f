//! Simulation report data.

use relay_domain::{InteractionKind, ReplyKind, Snowflake};
use serde::Serialize;

/// How the race for one interaction's first reply ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionOutcome {
    pub interaction_id: Snowflake,
    /// `None` for interactions with an unknown variant.
    #[serde(serialize_with = "serialize_kind")]
    pub variant: Option<InteractionKind>,
    /// Kind recorded by the reply guard.
    pub winner: Option<ReplyKind>,
    /// HTTP status the webhook would have answered with.
    pub webhook_status: Option<u16>,
    pub racers: usize,
    /// Racers rejected with "already replied".
    pub lost: usize,
    /// Racers whose send failed in transport.
    pub failed: usize,
}

fn serialize_kind<S>(kind: &Option<InteractionKind>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match kind {
        Some(kind) => serializer.serialize_some(kind.as_str()),
        None => serializer.serialize_none(),
    }
}

/// Result of a `simulate` run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub workers: usize,
    pub async_listeners: bool,
    pub interactions: Vec<InteractionOutcome>,
    /// Diagnostics reported by the dispatcher (unknown variants).
    pub diagnostics: Vec<String>,
}

impl SimulationReport {
    pub fn replied(&self) -> usize {
        self.interactions
            .iter()
            .filter(|o| o.winner.is_some())
            .count()
    }

    pub fn total_lost(&self) -> usize {
        self.interactions.iter().map(|o| o.lost).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.interactions.iter().map(|o| o.failed).sum()
    }

    /// Every interaction that had at least one racer got exactly one winner.
    pub fn is_consistent(&self) -> bool {
        self.interactions.iter().all(|o| {
            let winners = o.racers.saturating_sub(o.lost + o.failed);
            match o.winner {
                Some(_) => winners == 1,
                None => winners == 0,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(winner: Option<ReplyKind>, racers: usize, lost: usize) -> InteractionOutcome {
        InteractionOutcome {
            interaction_id: Snowflake(1),
            variant: Some(InteractionKind::Command),
            winner,
            webhook_status: winner.map(|_| 200),
            racers,
            lost,
            failed: 0,
        }
    }

    #[test]
    fn totals_and_consistency() {
        let report = SimulationReport {
            workers: 2,
            async_listeners: true,
            interactions: vec![
                outcome(Some(ReplyKind::Acknowledge), 3, 2),
                outcome(Some(ReplyKind::CreateMessage), 2, 1),
            ],
            diagnostics: Vec::new(),
        };
        assert_eq!(report.replied(), 2);
        assert_eq!(report.total_lost(), 3);
        assert!(report.is_consistent());

        let broken = SimulationReport {
            interactions: vec![outcome(Some(ReplyKind::Acknowledge), 3, 0)],
            ..SimulationReport::default()
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn serializes_variant_as_name() {
        let json = serde_json::to_value(outcome(Some(ReplyKind::Modal), 1, 0)).unwrap();
        assert_eq!(json["variant"], "command");
        assert_eq!(json["winner"], "modal");
        assert_eq!(json["interaction_id"], "1");
    }
}
