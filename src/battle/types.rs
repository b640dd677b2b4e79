use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::card::{Card, MonsterCard, Position};

pub const HERO_HP: i32 = 300;
pub const BOARD_LIMIT: usize = 3;
pub const MAX_MANA: u32 = 10;
pub const OPENING_HAND: usize = 3;
pub const HERO_POWER_COST: u32 = 3;
pub const HERO_POWER_DRAW: usize = 2;

/// Which of the two seats an action or card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Winner {
    Player,
    Opponent,
    Draw,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Opponent => Winner::Opponent,
        }
    }
}

/// Practice is the richer single-player ruleset against the AI, Versus the
/// lean one used for two remote humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum BattleMode {
    Practice,
    Versus,
}

impl BattleMode {
    pub fn spell_pool_size(self) -> usize {
        match self {
            BattleMode::Practice => 9,
            BattleMode::Versus => 4,
        }
    }

    pub fn hero_power_enabled(self) -> bool {
        self == BattleMode::Practice
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct HeroState {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub armor: i32,
}

impl HeroState {
    pub fn new(name: impl Into<String>) -> Self {
        HeroState {
            name: name.into(),
            hp: HERO_HP,
            max_hp: HERO_HP,
            armor: 0,
        }
    }

    /// Armor soaks damage first; hp may drop below zero.
    pub fn take_damage(&mut self, amount: i32) {
        let absorbed = self.armor.min(amount.max(0));
        self.armor -= absorbed;
        self.hp -= amount.max(0) - absorbed;
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct PlayerState {
    pub side: Side,
    pub label: String,
    /// Drawn from the front.
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
    pub board: Vec<MonsterCard>,
    pub hero: HeroState,
    pub mana: u32,
    pub max_mana: u32,
}

impl PlayerState {
    /// Move the top card of the deck into hand. Returns false on an empty deck.
    pub fn draw(&mut self) -> bool {
        if self.deck.is_empty() {
            return false;
        }
        let card = self.deck.remove(0);
        self.hand.push(card);
        true
    }

    /// Draw up to `count` cards, returning how many were actually drawn.
    pub fn draw_many(&mut self, count: usize) -> usize {
        (0..count).filter(|_| self.draw()).count()
    }

    pub fn has_defender(&self) -> bool {
        self.board.iter().any(MonsterCard::is_defender)
    }

    pub fn has_position(&self, position: Position) -> bool {
        self.board.iter().any(|m| m.position == position)
    }

    pub fn board_full(&self) -> bool {
        self.board.len() >= BOARD_LIMIT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct BattleState {
    pub mode: BattleMode,
    pub player: PlayerState,
    pub opponent: PlayerState,
    pub active: Side,
    pub turn: u32,
    pub winner: Option<Winner>,
    /// Set once start-of-turn has run for `active`, cleared by end-of-turn.
    pub turn_started: bool,
    pub log: Vec<String>,
}

impl BattleState {
    pub fn side(&self, side: Side) -> &PlayerState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut PlayerState {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Mutable access to both seats at once: (acting, defending).
    pub fn split_mut(&mut self, acting: Side) -> (&mut PlayerState, &mut PlayerState) {
        match acting {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}

/// A move requested on behalf of the active side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "action_type")]
pub enum Action {
    PlayCard {
        hand_index: usize,
    },
    AttackHero {
        attacker_index: usize,
    },
    AttackMinion {
        attacker_index: usize,
        target_index: usize,
    },
    HeroPower,
    EndTurn,
}
