//! First-come pairing queue.
//!
//! A participant joins with their lineup and is either paired on the spot
//! with the longest-waiting participant or left queued. Queued participants
//! poll until their pairing shows up; there is no server-side timeout, so
//! leaving is explicit. Lineups are checked on the way in, and a waiter
//! whose pairing fails keeps their place at the front.

use std::collections::{HashMap, VecDeque};

use rocket::futures::lock::Mutex;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use super::{MatchAction, MatchError, MatchRegistry};
use crate::battle::validate_lineup;
use crate::card::Lineup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    Idle,
    Queued,
    Matched { match_id: u64 },
}

#[derive(Default)]
struct QueueInner {
    waiting: VecDeque<(String, Lineup)>,
    /// Pairings not yet seen by the participant who was waiting.
    paired: HashMap<String, u64>,
}

#[derive(Default)]
pub struct MatchmakingQueue {
    inner: Mutex<QueueInner>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn join(
        &self,
        user_id: &str,
        lineup: Lineup,
        registry: &MatchRegistry,
    ) -> Result<QueueStatus, MatchError> {
        validate_lineup(&lineup).map_err(MatchError::Setup)?;
        let mut inner = self.inner.lock().await;
        if let Some(match_id) = inner.paired.remove(user_id) {
            return Ok(QueueStatus::Matched { match_id });
        }
        if let Some(slot) = inner.waiting.iter_mut().find(|(id, _)| id == user_id) {
            slot.1 = lineup;
            return Ok(QueueStatus::Queued);
        }
        let Some((first_id, first_lineup)) = inner.waiting.pop_front() else {
            inner.waiting.push_back((user_id.to_string(), lineup));
            log::debug!("{user_id} queued for a match");
            return Ok(QueueStatus::Queued);
        };

        match Self::pair(registry, &first_id, first_lineup.clone(), user_id).await {
            Ok(match_id) => {
                inner.paired.insert(first_id.clone(), match_id);
                log::info!("paired {first_id} with {user_id} in match {match_id}");
                Ok(QueueStatus::Matched { match_id })
            }
            Err(e) => {
                log::warn!("could not pair {first_id} with {user_id}: {e}");
                inner.waiting.push_front((first_id, first_lineup));
                Err(e)
            }
        }
    }

    async fn pair(
        registry: &MatchRegistry,
        first_id: &str,
        first_lineup: Lineup,
        second_id: &str,
    ) -> Result<u64, MatchError> {
        let created = registry.create(first_id, first_lineup).await?;
        registry.join(created.id, second_id).await?;
        registry.submit(created.id, first_id, MatchAction::Init).await?;
        Ok(created.id)
    }

    /// Current standing; a pending pairing is reported once and then
    /// forgotten.
    pub async fn poll(&self, user_id: &str) -> QueueStatus {
        let mut inner = self.inner.lock().await;
        if let Some(match_id) = inner.paired.remove(user_id) {
            return QueueStatus::Matched { match_id };
        }
        if inner.waiting.iter().any(|(id, _)| id == user_id) {
            QueueStatus::Queued
        } else {
            QueueStatus::Idle
        }
    }

    pub async fn leave(&self, user_id: &str) -> QueueStatus {
        let mut inner = self.inner.lock().await;
        inner.waiting.retain(|(id, _)| id != user_id);
        inner.paired.remove(user_id);
        QueueStatus::Idle
    }

    pub async fn queued_count(&self) -> usize {
        self.inner.lock().await.waiting.len()
    }
}
