#![allow(dead_code)]

use pitch_duel::battle::{build_initial_state, BattleMode, BattleState};
use pitch_duel::card::{
    Card, Keyword, Lineup, MonsterCard, Position, Rarity, RosterEntry, SpellCard, SpellEffect,
};

pub fn roster_entry(
    id: usize,
    position: Position,
    rarity: Rarity,
    attack: i32,
    defense: i32,
    magic: i32,
) -> RosterEntry {
    RosterEntry {
        id: format!("roster-{id}"),
        name: format!("{position:?} {id}"),
        position,
        rarity,
        base_attack: attack,
        base_defense: defense,
        base_magic: magic,
        evolution_level: 0,
    }
}

/// Three defenders, four midfielders and three forwards plus a keeper.
pub fn lineup() -> Lineup {
    let outfield = vec![
        roster_entry(0, Position::DEF, Rarity::Common, 3, 6, 1),
        roster_entry(1, Position::DEF, Rarity::Rare, 4, 7, 1),
        roster_entry(2, Position::DEF, Rarity::Common, 2, 5, 2),
        roster_entry(3, Position::MID, Rarity::Common, 5, 3, 4),
        roster_entry(4, Position::MID, Rarity::Rare, 6, 4, 5),
        roster_entry(5, Position::MID, Rarity::Common, 4, 3, 3),
        roster_entry(6, Position::MID, Rarity::Epic, 7, 4, 6),
        roster_entry(7, Position::FWD, Rarity::Common, 6, 2, 3),
        roster_entry(8, Position::FWD, Rarity::Legendary, 9, 3, 4),
        roster_entry(9, Position::FWD, Rarity::Mythic, 8, 4, 5),
    ];
    Lineup {
        outfield,
        keeper: roster_entry(10, Position::GK, Rarity::Epic, 1, 9, 2),
    }
}

pub fn fresh_state(seed: u64, mode: BattleMode) -> BattleState {
    let lineup = lineup();
    build_initial_state(&lineup.outfield, &lineup.keeper, seed, mode).expect("valid lineup")
}

/// A started practice match with empty hands, boards and decks, for
/// setting up exact positions.
pub fn blank_state() -> BattleState {
    let mut state = fresh_state(1, BattleMode::Practice);
    for seat in [&mut state.player, &mut state.opponent] {
        seat.hand.clear();
        seat.deck.clear();
        seat.board.clear();
        seat.mana = 10;
        seat.max_mana = 10;
    }
    state.log.clear();
    state
}

/// A board-ready footballer: awake, and able to attack unless a defender.
pub fn monster(id: u32, position: Position, attack: i32, health: i32) -> MonsterCard {
    let keywords = match position {
        Position::DEF => vec![Keyword::Taunt],
        _ => vec![],
    };
    MonsterCard {
        id,
        roster_id: format!("roster-{id}"),
        name: format!("{position:?} {id}"),
        position,
        rarity: Rarity::Common,
        mana_cost: 1,
        attack,
        health,
        max_health: health,
        magic: 0,
        keywords,
        has_summoning_sickness: false,
        can_attack: position != Position::DEF,
        stunned_for_turns: 0,
    }
}

pub fn spell(id: u32, effect: SpellEffect, value: i32, mana_cost: u32) -> Card {
    Card::Spell(SpellCard {
        id,
        name: format!("{effect:?}"),
        mana_cost,
        effect,
        value,
    })
}

/// Everything except the log.
pub fn without_log(state: &BattleState) -> BattleState {
    let mut copy = state.clone();
    copy.log.clear();
    copy
}
