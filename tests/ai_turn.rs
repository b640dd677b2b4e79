mod common;

use std::cell::Cell;

use common::{blank_state, fresh_state, monster, spell};
use pitch_duel::ai::{
    run_ai_turn, run_ai_turn_with, AiPolicy, ScriptedPolicy, AI_ACTION_CEILING,
};
use pitch_duel::battle::turn::end_turn;
use pitch_duel::battle::{apply, Action, BattleMode, BattleState, Side, Winner};
use pitch_duel::card::{Card, Keyword, Position, SpellEffect};

/// Opponent to move, start-of-turn not yet run.
fn opponent_pending(mut state: BattleState) -> BattleState {
    end_turn(&mut state);
    state
}

#[test]
fn ai_plays_monsters_before_spells() {
    let mut state = blank_state();
    state.opponent.mana = 0;
    state.opponent.max_mana = 0;
    state.turn = 3;
    state.opponent.hand = vec![
        spell(1, SpellEffect::DamageHero, 20, 2),
        Card::Monster(monster(2, Position::MID, 3, 3)),
    ];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    // 3 mana: midfielder (1) then the damage spell (2)
    assert_eq!(after.opponent.board.len(), 1);
    assert!(after.opponent.hand.is_empty());
    assert_eq!(after.player.hero.hp, 280);
    assert_eq!(after.active, Side::Player);
    assert_eq!(after.turn, 4);
}

#[test]
fn ai_respects_forward_needs_midfielder() {
    let mut state = blank_state();
    state.turn = 10;
    state.opponent.hand = vec![Card::Monster(monster(1, Position::FWD, 6, 3))];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    assert!(after.opponent.board.is_empty());
    assert_eq!(after.opponent.hand.len(), 1);
}

#[test]
fn ai_attacks_first_defender() {
    let mut state = blank_state();
    state.player.board = vec![
        monster(1, Position::MID, 1, 9),
        monster(2, Position::DEF, 1, 3),
        monster(3, Position::DEF, 1, 1),
    ];
    state.opponent.board = vec![monster(4, Position::FWD, 5, 5)];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    // the first defender (health 3) falls, not the weaker second one
    assert_eq!(after.player.board.len(), 2);
    assert_eq!(after.player.board[1].health, 1);
    assert_eq!(after.player.hero.hp, 300);
}

#[test]
fn ai_goes_for_keeper_when_undefended() {
    let mut state = blank_state();
    state.player.board = vec![monster(1, Position::MID, 1, 9)];
    state.opponent.board = vec![
        monster(2, Position::FWD, 5, 5),
        monster(3, Position::MID, 4, 5),
    ];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    assert_eq!(after.player.hero.hp, 291);
    // midfielder spent itself on the keeper
    assert_eq!(after.opponent.board.len(), 1);
    assert_eq!(after.opponent.board[0].position, Position::FWD);
    assert_eq!(after.active, Side::Player);
}

#[test]
fn ai_does_not_play_into_slots_freed_by_attacks() {
    let mut state = blank_state();
    state.opponent.board = vec![
        monster(1, Position::MID, 3, 5),
        monster(2, Position::FWD, 4, 5),
        monster(3, Position::FWD, 4, 5),
    ];
    state.opponent.hand = vec![Card::Monster(monster(4, Position::MID, 2, 2))];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    // the midfielder leaves after hitting the keeper, but card play is over
    assert_eq!(after.opponent.hand.len(), 1);
    let board: Vec<u32> = after.opponent.board.iter().map(|m| m.id).collect();
    assert_eq!(board, vec![2, 3]);
    assert_eq!(after.player.hero.hp, 300 - 3 - 4 - 4);
    assert_eq!(after.active, Side::Player);
}

#[test]
fn ai_rush_forward_joins_the_attack_phase() {
    let mut state = blank_state();
    state.turn = 5;
    state.opponent.board = vec![monster(1, Position::MID, 2, 5)];
    let mut rush = monster(2, Position::FWD, 6, 3);
    rush.keywords = vec![Keyword::Rush];
    state.opponent.hand = vec![Card::Monster(rush)];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    assert_eq!(after.player.hero.hp, 300 - 2 - 6);
    assert_eq!(after.opponent.board.len(), 1);
    assert_eq!(after.opponent.board[0].id, 2);
}

#[test]
fn ai_stops_when_it_wins() {
    let mut state = blank_state();
    state.player.hero.hp = 4;
    state.opponent.board = vec![monster(2, Position::FWD, 5, 5)];
    let state = opponent_pending(state);

    let after = run_ai_turn(&state);
    assert_eq!(after.winner, Some(Winner::Opponent));
    assert_eq!(after.active, Side::Opponent);
}

#[test]
fn ai_does_not_restart_a_started_turn() {
    let state = fresh_state(21, BattleMode::Practice);
    let state = apply(&state, &Action::EndTurn);
    let hand = state.opponent.hand.len();
    let deck = state.opponent.deck.len();

    let after = run_ai_turn(&state);
    let played = hand - after.opponent.hand.len();
    // no extra draw: the opening turn already drew
    assert_eq!(after.opponent.deck.len(), deck);
    assert!(played <= 1);
}

#[test]
fn ai_on_finished_match_is_a_no_op() {
    let mut state = blank_state();
    state.winner = Some(Winner::Player);
    state.active = Side::Opponent;
    assert_eq!(run_ai_turn(&state), state);
}

struct Stubborn {
    calls: Cell<usize>,
}

impl AiPolicy for Stubborn {
    fn choose_play(&self, _state: &BattleState) -> Option<Action> {
        self.calls.set(self.calls.get() + 1);
        Some(Action::PlayCard { hand_index: 99 })
    }
}

#[test]
fn scenario_f_ceiling_ends_turn_without_winner() {
    let state = opponent_pending(blank_state());
    let policy = Stubborn { calls: Cell::new(0) };

    let after = run_ai_turn_with(&policy, &state);
    assert_eq!(policy.calls.get(), AI_ACTION_CEILING);
    assert!(after.winner.is_none());
    assert_eq!(after.active, Side::Player);
    assert_eq!(after.turn, state.turn + 1);
    let rejections = after
        .log
        .iter()
        .filter(|line| line.starts_with("Rejected"))
        .count();
    assert_eq!(rejections, AI_ACTION_CEILING);
}

#[test]
fn scripted_policy_ends_turn_with_nothing_to_do() {
    let mut state = blank_state();
    state.active = Side::Opponent;
    assert_eq!(ScriptedPolicy.choose_play(&state), None);
}

#[test]
fn full_practice_match_finishes() {
    let mut state = fresh_state(77, BattleMode::Practice);
    for _ in 0..200 {
        if state.winner.is_some() {
            break;
        }
        state = run_ai_turn(&state);
        if state.winner.is_some() {
            break;
        }
        state = run_ai_turn(&state);
    }
    assert!(state.player.board.len() <= 3);
    assert!(state.opponent.board.len() <= 3);
}
