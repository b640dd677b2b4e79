//! Computer opponent.
//!
//! A turn has two phases. The play phase asks the policy for cards to play
//! until it has none left, bounded by [`AI_ACTION_CEILING`]. The attack
//! phase then walks every board card that was ready when the phase began
//! and lets the policy pick its target. [`run_ai_turn_with`] owns both loops
//! and the final `EndTurn`, whatever the policy does.

use crate::battle::engine::can_play;
use crate::battle::turn::ensure_turn_started;
use crate::battle::{apply, Action, BattleState};
use crate::card::Card;

/// Upper bound on play-phase actions the AI may take in one turn.
pub const AI_ACTION_CEILING: usize = 50;

pub trait AiPolicy {
    /// Next card to play for the active side, or `None` to move on to
    /// attacking.
    fn choose_play(&self, state: &BattleState) -> Option<Action>;

    /// Attack for the ready card at `attacker_index`: the first defender
    /// when the other side has one, otherwise the keeper.
    fn choose_attack(&self, state: &BattleState, attacker_index: usize) -> Option<Action> {
        let enemy = state.side(state.active.other());
        match enemy.board.iter().position(|m| m.is_defender()) {
            Some(target_index) => Some(Action::AttackMinion {
                attacker_index,
                target_index,
            }),
            None => Some(Action::AttackHero { attacker_index }),
        }
    }
}

/// Shipped heuristic: play footballers, then spells, then attack with
/// everything that was ready, always hitting the first defender.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedPolicy;

impl ScriptedPolicy {
    fn playable(state: &BattleState, want_monster: bool) -> Option<usize> {
        let side = state.active;
        state
            .side(side)
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| matches!(card, Card::Monster(_)) == want_monster)
            .map(|(i, _)| i)
            .find(|&i| can_play(state, side, i).is_ok())
    }
}

impl AiPolicy for ScriptedPolicy {
    fn choose_play(&self, state: &BattleState) -> Option<Action> {
        Self::playable(state, true)
            .or_else(|| Self::playable(state, false))
            .map(|hand_index| Action::PlayCard { hand_index })
    }
}

/// Play a whole turn for the active side with the scripted policy.
pub fn run_ai_turn(state: &BattleState) -> BattleState {
    run_ai_turn_with(&ScriptedPolicy, state)
}

pub fn run_ai_turn_with<P: AiPolicy + ?Sized>(policy: &P, state: &BattleState) -> BattleState {
    let mut current = state.clone();
    if current.is_terminal() {
        return current;
    }
    ensure_turn_started(&mut current);

    let mut taken = 0;
    while taken < AI_ACTION_CEILING {
        let action = match policy.choose_play(&current) {
            Some(Action::EndTurn) | None => break,
            Some(action) => action,
        };
        log::debug!("{} plays {:?}", current.side(current.active).label, action);
        current = apply(&current, &action);
        taken += 1;
        if current.is_terminal() {
            return current;
        }
    }
    if taken == AI_ACTION_CEILING {
        log::warn!("AI hit the {AI_ACTION_CEILING} action ceiling, moving on");
    }

    // board indices shift as cards leave, so track attackers by card id
    let ready: Vec<u32> = current
        .side(current.active)
        .board
        .iter()
        .filter(|m| m.can_attack)
        .map(|m| m.id)
        .collect();
    for card_id in ready {
        let own = current.side(current.active);
        let Some(attacker_index) = own.board.iter().position(|m| m.id == card_id) else {
            continue;
        };
        if !own.board[attacker_index].can_attack {
            continue;
        }
        let Some(action) = policy.choose_attack(&current, attacker_index) else {
            continue;
        };
        log::debug!("{} attacks with {:?}", own.label, action);
        current = apply(&current, &action);
        if current.is_terminal() {
            return current;
        }
    }

    apply(&current, &Action::EndTurn)
}
