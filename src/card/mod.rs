//! Battle cards and the rules that turn a roster entry into one.
//!
//! A roster entry is the collection-side view of a footballer card (base
//! stats plus evolution level). Deriving a [`MonsterCard`] from it fixes the
//! mana cost, attack, health and keywords for the lifetime of a match; only
//! the runtime fields (`can_attack`, summoning sickness, stun) change later.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

pub mod spells;

/// Pitch position of a footballer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Position {
    GK,
    DEF,
    MID,
    FWD,
}

/// Rarity tier, ordered from cheapest to most expensive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(crate = "rocket::serde")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Mana cost of a card of this tier: Common = 1 up to Mythic = 5.
    pub fn mana_cost(self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
            Rarity::Mythic => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Keyword {
    Taunt,
    Rush,
}

/// A collection card as supplied by the roster service. Ownership and
/// lineup legality are checked before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub rarity: Rarity,
    pub base_attack: i32,
    pub base_defense: i32,
    pub base_magic: i32,
    #[serde(default)]
    pub evolution_level: i32,
}

/// Ten outfield cards plus the goalkeeper who acts as hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Lineup {
    pub outfield: Vec<RosterEntry>,
    pub keeper: RosterEntry,
}

/// A footballer on the battle side of things.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MonsterCard {
    pub id: u32,
    pub roster_id: String,
    pub name: String,
    pub position: Position,
    pub rarity: Rarity,
    pub mana_cost: u32,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub magic: i32,
    pub keywords: Vec<Keyword>,
    pub has_summoning_sickness: bool,
    pub can_attack: bool,
    pub stunned_for_turns: u32,
}

impl MonsterCard {
    /// Derive a battle card from a roster entry.
    pub fn from_roster(id: u32, entry: &RosterEntry) -> Self {
        let evolution_bonus = entry.evolution_level / 2;
        let attack_bonus = match entry.rarity {
            Rarity::Legendary | Rarity::Mythic => 1,
            _ => 0,
        };
        let health_bonus = if entry.rarity == Rarity::Mythic { 3 } else { 0 };
        let attack = entry.base_attack + evolution_bonus + attack_bonus;
        let health = entry.base_defense + 5 + evolution_bonus + health_bonus;

        MonsterCard {
            id,
            roster_id: entry.id.clone(),
            name: entry.name.clone(),
            position: entry.position,
            rarity: entry.rarity,
            mana_cost: entry.rarity.mana_cost(),
            attack,
            health,
            max_health: health,
            magic: entry.base_magic,
            keywords: keywords_for(entry),
            has_summoning_sickness: true,
            can_attack: false,
            stunned_for_turns: 0,
        }
    }

    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    pub fn is_defender(&self) -> bool {
        self.position == Position::DEF
    }

    /// Attack eligibility at the start of its controller's turn.
    pub fn recompute_can_attack(&mut self) {
        self.can_attack = self.position != Position::DEF
            && !self.has_summoning_sickness
            && self.stunned_for_turns == 0;
    }
}

fn keywords_for(entry: &RosterEntry) -> Vec<Keyword> {
    match entry.position {
        Position::DEF => vec![Keyword::Taunt],
        Position::FWD => {
            let total = entry.base_attack
                + entry.base_magic
                + entry.base_defense
                + 2 * entry.evolution_level;
            if entry.base_attack >= 8 || total >= 20 {
                vec![Keyword::Rush]
            } else {
                vec![]
            }
        }
        Position::GK | Position::MID => vec![],
    }
}

/// Spell effect kinds; the magnitude lives on [`SpellCard::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum SpellEffect {
    DamageHero,
    HealHero,
    ShieldHero,
    ForwardStun,
    DrawCards,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SpellCard {
    pub id: u32,
    pub name: String,
    pub mana_cost: u32,
    pub effect: SpellEffect,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "card_kind")]
pub enum Card {
    Monster(MonsterCard),
    Spell(SpellCard),
}

impl Card {
    pub fn mana_cost(&self) -> u32 {
        match self {
            Card::Monster(m) => m.mana_cost,
            Card::Spell(s) => s.mana_cost,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Card::Monster(m) => &m.name,
            Card::Spell(s) => &s.name,
        }
    }
}
