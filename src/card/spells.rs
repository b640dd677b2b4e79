use rand::Rng;

use super::{SpellCard, SpellEffect};

/// One row of the static spell table.
pub struct SpellTemplate {
    pub name: &'static str,
    pub mana_cost: u32,
    pub effect: SpellEffect,
    pub value: i32,
}

pub const SPELL_TABLE: &[SpellTemplate] = &[
    SpellTemplate {
        name: "Long Shot",
        mana_cost: 2,
        effect: SpellEffect::DamageHero,
        value: 20,
    },
    SpellTemplate {
        name: "Top Corner",
        mana_cost: 4,
        effect: SpellEffect::DamageHero,
        value: 40,
    },
    SpellTemplate {
        name: "Physio",
        mana_cost: 2,
        effect: SpellEffect::HealHero,
        value: 25,
    },
    SpellTemplate {
        name: "Park the Bus",
        mana_cost: 3,
        effect: SpellEffect::ShieldHero,
        value: 30,
    },
    SpellTemplate {
        name: "Hard Tackle",
        mana_cost: 2,
        effect: SpellEffect::ForwardStun,
        value: 1,
    },
    SpellTemplate {
        name: "Scouting Report",
        mana_cost: 3,
        effect: SpellEffect::DrawCards,
        value: 2,
    },
];

impl SpellTemplate {
    pub fn instantiate(&self, id: u32) -> SpellCard {
        SpellCard {
            id,
            name: self.name.to_string(),
            mana_cost: self.mana_cost,
            effect: self.effect,
            value: self.value,
        }
    }
}

/// Sample `count` spells from the table with replacement. Ids are assigned
/// consecutively from `first_id`.
pub fn sample_spells<R: Rng + ?Sized>(rng: &mut R, count: usize, first_id: u32) -> Vec<SpellCard> {
    (0..count)
        .map(|offset| {
            let template = &SPELL_TABLE[rng.gen_range(0..SPELL_TABLE.len())];
            template.instantiate(first_id + offset as u32)
        })
        .collect()
}
