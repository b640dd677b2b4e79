//! Deck construction and opening state.

use rand::seq::SliceRandom;

use super::seed::seeded_rng;
use super::turn::start_turn;
use super::types::{BattleMode, BattleState, HeroState, PlayerState, Side, OPENING_HAND};
use crate::card::spells::sample_spells;
use crate::card::{Card, Lineup, MonsterCard, Position, RosterEntry};

pub const OUTFIELD_SIZE: usize = 10;

/// Build the shared deck template: ten footballers plus a sampled spell
/// pool, shuffled once.
pub fn build_deck(outfield: &[RosterEntry], seed: u64, mode: BattleMode) -> Vec<Card> {
    let mut rng = seeded_rng(seed);
    let mut deck: Vec<Card> = outfield
        .iter()
        .enumerate()
        .map(|(i, entry)| Card::Monster(MonsterCard::from_roster(i as u32, entry)))
        .collect();
    let spells = sample_spells(&mut rng, mode.spell_pool_size(), outfield.len() as u32);
    deck.extend(spells.into_iter().map(Card::Spell));
    deck.shuffle(&mut rng);
    deck
}

fn validate_roster(outfield: &[RosterEntry], keeper: &RosterEntry) -> Result<(), String> {
    if outfield.len() != OUTFIELD_SIZE {
        return Err(format!(
            "Lineup needs exactly {OUTFIELD_SIZE} outfield cards, got {}",
            outfield.len()
        ));
    }
    if let Some(gk) = outfield.iter().find(|e| e.position == Position::GK) {
        return Err(format!("Goalkeeper {} cannot play outfield", gk.name));
    }
    if keeper.position != Position::GK {
        return Err(format!("Hero card {} is not a goalkeeper", keeper.name));
    }
    Ok(())
}

/// Check a lineup without building a match from it.
pub fn validate_lineup(lineup: &Lineup) -> Result<(), String> {
    validate_roster(&lineup.outfield, &lineup.keeper)
}

fn new_side(side: Side, label: &str, keeper: &RosterEntry, deck: Vec<Card>) -> PlayerState {
    let mut state = PlayerState {
        side,
        label: label.to_string(),
        deck,
        hand: Vec::new(),
        board: Vec::new(),
        hero: HeroState::new(keeper.name.clone()),
        mana: 0,
        max_mana: 0,
    };
    state.draw_many(OPENING_HAND);
    state
}

/// Create the opening state of a match. Both sides draw from their own copy
/// of one shuffled template; the player moves first and has already had its
/// start-of-turn step when this returns.
pub fn build_initial_state(
    outfield: &[RosterEntry],
    keeper: &RosterEntry,
    seed: u64,
    mode: BattleMode,
) -> Result<BattleState, String> {
    validate_roster(outfield, keeper)?;
    let template = build_deck(outfield, seed, mode);
    log::debug!(
        "built {} card deck for {:?} match (seed {seed})",
        template.len(),
        mode
    );

    let mut state = BattleState {
        mode,
        player: new_side(Side::Player, "Player", keeper, template.clone()),
        opponent: new_side(Side::Opponent, "Opponent", keeper, template),
        active: Side::Player,
        turn: 1,
        winner: None,
        turn_started: false,
        log: vec!["Kick-off!".to_string()],
    };
    start_turn(&mut state, Side::Player);
    Ok(state)
}
