use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use super::MatchAction;
use crate::battle::{apply, build_initial_state, BattleMode, BattleState};
use crate::card::Lineup;

/// Stored entry in a match's append-only action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MatchLogEntry {
    pub seq: u64,
    pub actor: String,
    pub action: MatchAction,
    /// Match version after the action was applied.
    pub version: u64,
    /// Milliseconds since the unix epoch.
    pub timestamp: String,
}

/// Every action the match accepted, in order. Lives inside the match
/// record, so the record's lock already serializes appends.
#[derive(Debug, Clone, Default)]
pub struct MatchLog {
    entries: Vec<MatchLogEntry>,
    seq: u64,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning the next sequence number (starting at 1).
    pub fn append(&mut self, actor: &str, action: MatchAction, version: u64) -> MatchLogEntry {
        self.seq += 1;
        let timestamp = match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(dur) => format!("{}", dur.as_millis()),
            Err(_) => "0".to_string(),
        };
        let entry = MatchLogEntry {
            seq: self.seq,
            actor: actor.to_string(),
            action,
            version,
            timestamp,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> Vec<MatchLogEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with `seq >= from_seq`, at most `limit` of them, plus the
    /// sequence number to continue from when more remain.
    pub fn page(&self, from_seq: Option<u64>, limit: usize) -> (Vec<MatchLogEntry>, Option<u64>) {
        let mut filtered: Vec<MatchLogEntry> = self
            .entries
            .iter()
            .filter(|e| from_seq.map_or(true, |f| e.seq >= f))
            .cloned()
            .collect();
        let has_more = filtered.len() > limit;
        filtered.truncate(limit);
        let next_seq = if has_more {
            filtered.last().map(|e| e.seq + 1)
        } else {
            None
        };
        (filtered, next_seq)
    }
}

/// Re-run setup and every logged battle action. Returns `None` when the
/// log never reached `Init`.
pub fn replay(
    lineup: &Lineup,
    seed: u64,
    labels: (&str, &str),
    entries: &[MatchLogEntry],
) -> Result<Option<BattleState>, String> {
    let mut state: Option<BattleState> = None;
    for entry in entries {
        match &entry.action {
            MatchAction::Init => {
                if state.is_none() {
                    let mut initial = build_initial_state(
                        &lineup.outfield,
                        &lineup.keeper,
                        seed,
                        BattleMode::Versus,
                    )?;
                    initial.player.label = labels.0.to_string();
                    initial.opponent.label = labels.1.to_string();
                    state = Some(initial);
                }
            }
            MatchAction::Battle { action } => {
                let current = state
                    .as_ref()
                    .ok_or_else(|| format!("entry {} precedes Init", entry.seq))?;
                state = Some(apply(current, action));
            }
        }
    }
    Ok(state)
}
