//! Pure action resolution: `apply(state, action) -> state'`.
//!
//! Illegal actions never error. They return the previous state with one
//! extra log line, so callers can always replace their copy wholesale.

use super::turn::{end_turn, start_turn};
use super::types::{Action, BattleState, Side, Winner, HERO_POWER_COST, HERO_POWER_DRAW};
use crate::card::{Card, Keyword, MonsterCard, Position, SpellCard, SpellEffect};

/// Apply `action` on behalf of the active side.
pub fn apply(state: &BattleState, action: &Action) -> BattleState {
    let mut next = state.clone();
    match resolve(&mut next, action) {
        Ok(()) => next,
        Err(reason) => {
            log::debug!("rejected {:?}: {}", action, reason);
            let mut rejected = state.clone();
            rejected.push_log(format!("Rejected: {reason}"));
            rejected
        }
    }
}

/// True when `after` is `before` plus nothing but extra log lines.
pub fn was_rejected(before: &BattleState, after: &BattleState) -> bool {
    let mut stripped = after.clone();
    stripped.log.truncate(before.log.len());
    stripped == *before
}

fn resolve(state: &mut BattleState, action: &Action) -> Result<(), String> {
    if state.is_terminal() {
        return Err("the match is already over".to_string());
    }
    let acting = state.active;
    match action {
        Action::PlayCard { hand_index } => play_card(state, acting, *hand_index),
        Action::AttackHero { attacker_index } => attack_hero(state, acting, *attacker_index),
        Action::AttackMinion {
            attacker_index,
            target_index,
        } => attack_minion(state, acting, *attacker_index, *target_index),
        Action::HeroPower => hero_power(state, acting),
        Action::EndTurn => {
            end_turn(state);
            let next = state.active;
            start_turn(state, next);
            Ok(())
        }
    }
}

/// Hand-side legality shared by the engine and the AI.
pub fn can_play(state: &BattleState, side: Side, hand_index: usize) -> Result<(), String> {
    let seat = state.side(side);
    let card = seat
        .hand
        .get(hand_index)
        .ok_or_else(|| format!("no card at hand index {hand_index}"))?;
    if card.mana_cost() > seat.mana {
        return Err(format!(
            "{} costs {} mana but only {} available",
            card.name(),
            card.mana_cost(),
            seat.mana
        ));
    }
    if let Card::Monster(monster) = card {
        if seat.board_full() {
            return Err("board is full".to_string());
        }
        if monster.position == Position::FWD && !seat.has_position(Position::MID) {
            return Err(format!("{} needs a midfielder on the board", monster.name));
        }
    }
    Ok(())
}

fn play_card(state: &mut BattleState, acting: Side, hand_index: usize) -> Result<(), String> {
    can_play(state, acting, hand_index)?;
    let seat = state.side_mut(acting);
    let card = seat.hand.remove(hand_index);
    seat.mana -= card.mana_cost();
    let label = seat.label.clone();

    match card {
        Card::Monster(mut monster) => {
            let rush = monster.has_keyword(Keyword::Rush);
            monster.has_summoning_sickness = !rush;
            monster.can_attack = monster.position != Position::DEF && rush;
            monster.stunned_for_turns = 0;
            let line = format!("{label} plays {} ({:?})", monster.name, monster.position);
            seat.board.push(monster);
            state.push_log(line);
        }
        Card::Spell(spell) => {
            state.push_log(format!("{label} casts {}", spell.name));
            cast_spell(state, acting, &spell);
            check_winner(state);
        }
    }
    Ok(())
}

fn cast_spell(state: &mut BattleState, acting: Side, spell: &SpellCard) {
    let value = spell.value;
    match spell.effect {
        SpellEffect::DamageHero => {
            let hero = &mut state.side_mut(acting.other()).hero;
            hero.take_damage(value);
            let line = format!("{} takes {value} damage", hero.name);
            state.push_log(line);
        }
        SpellEffect::HealHero => {
            let hero = &mut state.side_mut(acting).hero;
            hero.heal(value);
            let line = format!("{} heals to {}", hero.name, hero.hp);
            state.push_log(line);
        }
        SpellEffect::ShieldHero => {
            let armor_gain = value * 6 / 10;
            let heal_gain = value - armor_gain;
            let hero = &mut state.side_mut(acting).hero;
            hero.armor += armor_gain;
            hero.heal(heal_gain);
            let line = format!("{} gains {armor_gain} armor and heals {heal_gain}", hero.name);
            state.push_log(line);
        }
        SpellEffect::ForwardStun => {
            let board = &mut state.side_mut(acting.other()).board;
            match strongest_forward(board) {
                Some(index) => {
                    let target = &mut board[index];
                    target.stunned_for_turns += value.max(0) as u32;
                    target.can_attack = false;
                    let line = format!(
                        "{} is stunned for {} turn(s)",
                        target.name, target.stunned_for_turns
                    );
                    state.push_log(line);
                }
                None => state.push_log("No forward to stun"),
            }
        }
        SpellEffect::DrawCards => {
            let drawn = state.side_mut(acting).draw_many(value.max(0) as usize);
            state.push_log(format!("Drew {drawn} card(s)"));
        }
    }
}

/// Highest-attack forward; the earliest one wins ties.
fn strongest_forward(board: &[MonsterCard]) -> Option<usize> {
    board
        .iter()
        .enumerate()
        .filter(|(_, m)| m.position == Position::FWD)
        .fold(None, |best: Option<(usize, i32)>, (i, m)| match best {
            Some((_, attack)) if attack >= m.attack => best,
            _ => Some((i, m.attack)),
        })
        .map(|(i, _)| i)
}

fn ready_attacker(board: &[MonsterCard], index: usize) -> Result<&MonsterCard, String> {
    let attacker = board
        .get(index)
        .ok_or_else(|| format!("no attacker at board index {index}"))?;
    if !attacker.can_attack {
        return Err(format!("{} cannot attack right now", attacker.name));
    }
    Ok(attacker)
}

fn attack_hero(state: &mut BattleState, acting: Side, attacker_index: usize) -> Result<(), String> {
    let (own, enemy) = state.split_mut(acting);
    let attacker = ready_attacker(&own.board, attacker_index)?;
    if enemy.has_defender() {
        return Err("defenders must be cleared before attacking the keeper".to_string());
    }
    let damage = attacker.attack;
    let name = attacker.name.clone();
    enemy.hero.take_damage(damage);
    let line = format!("{name} hits {} for {damage}", enemy.hero.name);

    if own.board[attacker_index].position == Position::MID {
        own.board.remove(attacker_index);
        state.push_log(line);
        state.push_log(format!("{name} is spent and leaves the pitch"));
    } else {
        own.board[attacker_index].can_attack = false;
        state.push_log(line);
    }
    check_winner(state);
    Ok(())
}

fn attack_minion(
    state: &mut BattleState,
    acting: Side,
    attacker_index: usize,
    target_index: usize,
) -> Result<(), String> {
    let (own, enemy) = state.split_mut(acting);
    let attacker = ready_attacker(&own.board, attacker_index)?;
    let target = enemy
        .board
        .get(target_index)
        .ok_or_else(|| format!("no target at board index {target_index}"))?;
    if enemy.has_defender() && !target.is_defender() {
        return Err(format!("{} must attack a defender first", attacker.name));
    }

    let taunt_immune = attacker.position == Position::FWD && target.has_keyword(Keyword::Taunt);
    let (attack_dealt, attack_returned) = (attacker.attack, target.attack);
    let (attacker_name, target_name) = (attacker.name.clone(), target.name.clone());

    enemy.board[target_index].health -= attack_dealt;
    if !taunt_immune {
        own.board[attacker_index].health -= attack_returned;
    }
    own.board[attacker_index].can_attack = false;

    let target_down = enemy.board[target_index].health <= 0;
    let attacker_down = own.board[attacker_index].health <= 0;
    if target_down {
        enemy.board.remove(target_index);
    }
    if attacker_down {
        own.board.remove(attacker_index);
    }

    state.push_log(format!("{attacker_name} challenges {target_name}"));
    if target_down {
        state.push_log(format!("{target_name} is knocked out"));
    }
    if attacker_down {
        state.push_log(format!("{attacker_name} is knocked out"));
    }
    Ok(())
}

fn hero_power(state: &mut BattleState, acting: Side) -> Result<(), String> {
    if !state.mode.hero_power_enabled() {
        return Err("hero power is not available in this mode".to_string());
    }
    let seat = state.side_mut(acting);
    if seat.mana < HERO_POWER_COST {
        return Err(format!(
            "hero power costs {HERO_POWER_COST} mana but only {} available",
            seat.mana
        ));
    }
    seat.mana -= HERO_POWER_COST;
    let drawn = seat.draw_many(HERO_POWER_DRAW);
    let line = format!("{} uses hero power and draws {drawn}", seat.label);
    state.push_log(line);
    Ok(())
}

/// Set `winner` once a keeper has fallen.
pub fn check_winner(state: &mut BattleState) {
    if state.winner.is_some() {
        return;
    }
    let player_down = state.player.hero.is_defeated();
    let opponent_down = state.opponent.hero.is_defeated();
    let winner = match (player_down, opponent_down) {
        (true, true) => Some(Winner::Draw),
        (true, false) => Some(Winner::Opponent),
        (false, true) => Some(Winner::Player),
        (false, false) => None,
    };
    if let Some(winner) = winner {
        state.winner = Some(winner);
        state.push_log(format!("Full time: {winner:?}"));
    }
}
