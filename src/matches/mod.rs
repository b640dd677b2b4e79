//! Server-authoritative PvP matches.
//!
//! The registry owns one canonical [`BattleState`] per match. Each match
//! sits behind its own async lock and every submission holds that lock for
//! the whole read-modify-write, so two requests can never both act on the
//! same pre-action state. The transition itself is the same pure
//! [`apply`](crate::battle::apply) the single-player client uses.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::RngCore;
use rand_pcg::Lcg64Xsh32;
use rocket::futures::lock::Mutex;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::battle::seed::seeded_rng;
use crate::battle::{
    apply, build_initial_state, validate_lineup, Action, BattleMode, BattleState, Side, Winner,
};
use crate::card::Lineup;

pub mod action_log;
pub mod endpoints;
pub mod matchmaking;

use self::action_log::{MatchLog, MatchLogEntry};

pub const TURN_TIMER_ACTOR: &str = "turn-timer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Waiting,
    InProgress,
    Completed,
}

/// What a client may submit against a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "kind")]
pub enum MatchAction {
    /// Deal the opening state. Safe to repeat.
    Init,
    Battle { action: Action },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    NotFound(u64),
    NotYourTurn,
    NotParticipant,
    NotInProgress(MatchStatus),
    WaitingForOpponent,
    MatchFull,
    Setup(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotFound(id) => write!(f, "Match {id} not found"),
            MatchError::NotYourTurn => write!(f, "Not your turn"),
            MatchError::NotParticipant => write!(f, "Not a participant of this match"),
            MatchError::NotInProgress(status) => write!(f, "Match is not in progress ({status:?})"),
            MatchError::WaitingForOpponent => write!(f, "Waiting for an opponent to join"),
            MatchError::MatchFull => write!(f, "Match already has two players"),
            MatchError::Setup(reason) => write!(f, "Could not set up match: {reason}"),
        }
    }
}

impl std::error::Error for MatchError {}

/// The wire view of a match, returned by every match endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MatchResource {
    pub id: u64,
    pub status: MatchStatus,
    pub player1_id: String,
    pub player2_id: Option<String>,
    pub current_turn_player_id: Option<String>,
    pub winner_user_id: Option<String>,
    /// Bumped on every accepted change so pollers can skip stale copies.
    pub version: u64,
    pub battle_state: Option<BattleState>,
}

/// Canonical server-side record of one match.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub id: u64,
    pub status: MatchStatus,
    pub player1_id: String,
    pub player2_id: Option<String>,
    pub current_turn_player_id: Option<String>,
    pub winner_user_id: Option<String>,
    pub version: u64,
    pub battle_state: Option<BattleState>,
    pub seed: u64,
    pub lineup: Lineup,
    pub log: MatchLog,
}

impl MatchRecord {
    pub fn new(id: u64, player1_id: &str, lineup: Lineup, seed: u64) -> Self {
        MatchRecord {
            id,
            status: MatchStatus::Waiting,
            player1_id: player1_id.to_string(),
            player2_id: None,
            current_turn_player_id: None,
            winner_user_id: None,
            version: 0,
            battle_state: None,
            seed,
            lineup,
            log: MatchLog::new(),
        }
    }

    pub fn resource(&self) -> MatchResource {
        MatchResource {
            id: self.id,
            status: self.status,
            player1_id: self.player1_id.clone(),
            player2_id: self.player2_id.clone(),
            current_turn_player_id: self.current_turn_player_id.clone(),
            winner_user_id: self.winner_user_id.clone(),
            version: self.version,
            battle_state: self.battle_state.clone(),
        }
    }

    fn is_participant(&self, user_id: &str) -> bool {
        self.player1_id == user_id || self.player2_id.as_deref() == Some(user_id)
    }

    /// User id seated on `side`: player1 plays `Player`, player2 `Opponent`.
    pub fn user_for(&self, side: Side) -> Option<String> {
        match side {
            Side::Player => Some(self.player1_id.clone()),
            Side::Opponent => self.player2_id.clone(),
        }
    }

    pub fn join(&mut self, user_id: &str) -> Result<(), MatchError> {
        if self.is_participant(user_id) {
            return Ok(());
        }
        if self.player2_id.is_some() {
            return Err(MatchError::MatchFull);
        }
        self.player2_id = Some(user_id.to_string());
        self.version += 1;
        Ok(())
    }

    pub fn submit(&mut self, user_id: &str, action: MatchAction) -> Result<(), MatchError> {
        match action {
            MatchAction::Init => self.init(user_id),
            MatchAction::Battle { action } => self.play(user_id, action),
        }
    }

    fn init(&mut self, user_id: &str) -> Result<(), MatchError> {
        if !self.is_participant(user_id) {
            return Err(MatchError::NotParticipant);
        }
        if self.status != MatchStatus::Waiting {
            return Ok(());
        }
        let player2_id = self
            .player2_id
            .clone()
            .ok_or(MatchError::WaitingForOpponent)?;
        let mut state = build_initial_state(
            &self.lineup.outfield,
            &self.lineup.keeper,
            self.seed,
            BattleMode::Versus,
        )
        .map_err(MatchError::Setup)?;
        state.player.label = self.player1_id.clone();
        state.opponent.label = player2_id;

        self.battle_state = Some(state);
        self.status = MatchStatus::InProgress;
        self.current_turn_player_id = Some(self.player1_id.clone());
        self.version += 1;
        self.log.append(user_id, MatchAction::Init, self.version);
        log::info!("match {} started", self.id);
        Ok(())
    }

    fn play(&mut self, user_id: &str, action: Action) -> Result<(), MatchError> {
        if self.status != MatchStatus::InProgress {
            return Err(MatchError::NotInProgress(self.status));
        }
        if self.current_turn_player_id.as_deref() != Some(user_id) {
            return Err(MatchError::NotYourTurn);
        }
        self.apply_for_turn_owner(user_id, action);
        Ok(())
    }

    /// Run `action` for whoever owns the turn and persist the result.
    fn apply_for_turn_owner(&mut self, actor: &str, action: Action) {
        let Some(state) = self.battle_state.as_ref() else {
            return;
        };
        let next = apply(state, &action);
        let active = next.active;
        let winner = next.winner;
        self.battle_state = Some(next);
        self.version += 1;
        self.log.append(actor, MatchAction::Battle { action }, self.version);

        self.current_turn_player_id = self.user_for(active);
        if let Some(winner) = winner {
            self.status = MatchStatus::Completed;
            self.winner_user_id = match winner {
                Winner::Player => self.user_for(Side::Player),
                Winner::Opponent => self.user_for(Side::Opponent),
                Winner::Draw => None,
            };
            log::info!(
                "match {} completed, winner {:?}",
                self.id,
                self.winner_user_id
            );
        }
    }

    /// End the current turn on the owner's behalf, as a turn timer would.
    pub fn expire_turn(&mut self) -> Result<(), MatchError> {
        if self.status != MatchStatus::InProgress {
            return Err(MatchError::NotInProgress(self.status));
        }
        log::info!(
            "turn timer expired for {:?} in match {}",
            self.current_turn_player_id,
            self.id
        );
        self.apply_for_turn_owner(TURN_TIMER_ACTOR, Action::EndTurn);
        Ok(())
    }

    /// Rebuild the battle state from the seed, lineup and logged actions.
    pub fn replay(&self) -> Result<Option<BattleState>, String> {
        action_log::replay(
            &self.lineup,
            self.seed,
            (&self.player1_id, self.player2_id.as_deref().unwrap_or_default()),
            &self.log.entries(),
        )
    }
}

/// All live matches, each independently lockable.
pub struct MatchRegistry {
    matches: Mutex<HashMap<u64, Arc<Mutex<MatchRecord>>>>,
    next_id: AtomicU64,
    seed_rng: Mutex<Lcg64Xsh32>,
}

impl MatchRegistry {
    pub fn new(seed: u64) -> Self {
        MatchRegistry {
            matches: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            seed_rng: Mutex::new(seeded_rng(seed)),
        }
    }

    async fn handle(&self, match_id: u64) -> Result<Arc<Mutex<MatchRecord>>, MatchError> {
        let matches = self.matches.lock().await;
        matches
            .get(&match_id)
            .cloned()
            .ok_or(MatchError::NotFound(match_id))
    }

    /// Open a match for `user_id`. The lineup is checked here so a bad one
    /// never reaches `Init`.
    pub async fn create(
        &self,
        user_id: &str,
        lineup: Lineup,
    ) -> Result<MatchResource, MatchError> {
        validate_lineup(&lineup).map_err(MatchError::Setup)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let seed = self.seed_rng.lock().await.next_u64();
        let record = MatchRecord::new(id, user_id, lineup, seed);
        let resource = record.resource();
        self.matches
            .lock()
            .await
            .insert(id, Arc::new(Mutex::new(record)));
        log::info!("match {id} created by {user_id}");
        Ok(resource)
    }

    pub async fn get(&self, match_id: u64) -> Result<MatchResource, MatchError> {
        let handle = self.handle(match_id).await?;
        let record = handle.lock().await;
        Ok(record.resource())
    }

    /// Clone of the full record, including seed and log.
    pub async fn record(&self, match_id: u64) -> Result<MatchRecord, MatchError> {
        let handle = self.handle(match_id).await?;
        let record = handle.lock().await;
        Ok(record.clone())
    }

    pub async fn join(&self, match_id: u64, user_id: &str) -> Result<MatchResource, MatchError> {
        let handle = self.handle(match_id).await?;
        let mut record = handle.lock().await;
        record.join(user_id)?;
        Ok(record.resource())
    }

    pub async fn submit(
        &self,
        match_id: u64,
        user_id: &str,
        action: MatchAction,
    ) -> Result<MatchResource, MatchError> {
        let handle = self.handle(match_id).await?;
        let mut record = handle.lock().await;
        if let Err(e) = record.submit(user_id, action) {
            log::debug!("match {match_id}: {user_id} rejected: {e}");
            return Err(e);
        }
        Ok(record.resource())
    }

    pub async fn expire_turn(&self, match_id: u64) -> Result<MatchResource, MatchError> {
        let handle = self.handle(match_id).await?;
        let mut record = handle.lock().await;
        record.expire_turn()?;
        Ok(record.resource())
    }

    pub async fn actions(
        &self,
        match_id: u64,
        from_seq: Option<u64>,
        limit: usize,
    ) -> Result<(Vec<MatchLogEntry>, Option<u64>), MatchError> {
        let handle = self.handle(match_id).await?;
        let record = handle.lock().await;
        Ok(record.log.page(from_seq, limit))
    }
}
