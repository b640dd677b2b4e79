//! Start- and end-of-turn transitions.

use super::types::{BattleState, Side, MAX_MANA};

/// Refill mana, wake up the board and draw one card for `side`.
pub fn start_turn(state: &mut BattleState, side: Side) {
    let turn = state.turn;
    let seat = state.side_mut(side);
    seat.max_mana = turn.min(MAX_MANA);
    seat.mana = seat.max_mana;
    for card in seat.board.iter_mut() {
        card.has_summoning_sickness = false;
        card.stunned_for_turns = card.stunned_for_turns.saturating_sub(1);
        card.recompute_can_attack();
    }
    let drew = seat.draw();
    let line = format!(
        "{} starts turn {} with {} mana{}",
        seat.label,
        turn,
        seat.max_mana,
        if drew { "" } else { " (deck empty)" }
    );
    state.turn_started = true;
    state.push_log(line);
}

/// Hand control to the other side. The turn counter only advances when
/// control comes back to the player.
pub fn end_turn(state: &mut BattleState) {
    let ending = state.active;
    state.active = ending.other();
    if ending == Side::Opponent {
        state.turn += 1;
    }
    state.turn_started = false;
    let label = state.side(ending).label.clone();
    state.push_log(format!("{label} ends the turn"));
}

/// Run start-of-turn for the active side unless it already ran.
pub fn ensure_turn_started(state: &mut BattleState) {
    if !state.turn_started {
        let side = state.active;
        start_turn(state, side);
    }
}
