//! Normalization ceilings.
//!
//! Every scalar feature is `clamp(value / ceiling, 0, 1)`; the denominators
//! live here and nowhere else.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ceilings {
    pub hp: f32,
    pub block: f32,
    pub monster_block: f32,
    pub energy: f32,
    pub gold: f32,
    pub power: f32,
    /// Derived strength/dexterity sums.
    pub derived_power: f32,
    pub debuff: f32,
    pub focus: f32,
    pub hand: f32,
    pub draw: f32,
    pub discard: f32,
    pub exhaust: f32,
    pub deck: f32,
    pub cards_discarded: f32,
    pub times_damaged: f32,
    /// Damage-taken counter in the global block, which saturates sooner.
    pub times_damaged_global: f32,
    pub turn: f32,
    pub card_cost: f32,
    /// Hand total cost.
    pub total_cost: f32,
    /// Draw/discard/exhaust total cost.
    pub pile_total_cost: f32,
    pub upgrades: f32,
    pub damage: f32,
    pub monster_hp: f32,
    pub move_id: f32,
    pub relics: f32,
    pub relic_unknown: f32,
    pub potion_slots: f32,
    pub active_powers: f32,
    pub floor: f32,
    pub act: f32,
    pub ascension: f32,
    pub map_nodes: f32,
    pub map_coordinate: f32,
    pub reachable: f32,
    pub adjacency: f32,
    pub purge_cost: f32,
    pub limbo: f32,
    pub symbol_monster: f32,
    pub symbol_elite: f32,
    pub symbol_boss: f32,
    pub symbol_event: f32,
    pub symbol_shop: f32,
    pub symbol_rest: f32,
    pub symbol_treasure: f32,
    pub symbol_other: f32,
    /// Saturation point for multi-hot counts.
    pub multi_hot: f32,
}

pub const CEILINGS: Ceilings = Ceilings {
    hp: 200.0,
    block: 999.0,
    monster_block: 100.0,
    energy: 20.0,
    gold: 999.0,
    power: 99.0,
    derived_power: 30.0,
    debuff: 15.0,
    focus: 10.0,
    hand: 10.0,
    draw: 80.0,
    discard: 80.0,
    exhaust: 50.0,
    deck: 60.0,
    cards_discarded: 15.0,
    times_damaged: 50.0,
    times_damaged_global: 20.0,
    turn: 50.0,
    card_cost: 5.0,
    total_cost: 30.0,
    pile_total_cost: 100.0,
    upgrades: 10.0,
    damage: 99.0,
    monster_hp: 500.0,
    move_id: 100.0,
    relics: 50.0,
    relic_unknown: 10.0,
    potion_slots: 5.0,
    active_powers: 20.0,
    floor: 55.0,
    act: 4.0,
    ascension: 20.0,
    map_nodes: 60.0,
    map_coordinate: 15.0,
    reachable: 5.0,
    adjacency: 4.0,
    purge_cost: 150.0,
    limbo: 5.0,
    symbol_monster: 30.0,
    symbol_elite: 10.0,
    symbol_boss: 10.0,
    symbol_event: 15.0,
    symbol_shop: 10.0,
    symbol_rest: 15.0,
    symbol_treasure: 10.0,
    symbol_other: 10.0,
    multi_hot: 1.0,
};

impl Ceilings {
    /// Histogram ceilings in map-symbol order, "other" last.
    #[must_use]
    pub const fn symbol_ceilings(&self) -> [f32; 8] {
        [
            self.symbol_monster,
            self.symbol_elite,
            self.symbol_boss,
            self.symbol_event,
            self.symbol_shop,
            self.symbol_rest,
            self.symbol_treasure,
            self.symbol_other,
        ]
    }

    /// Every ceiling with its field name.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, f32)> {
        vec![
            ("hp", self.hp),
            ("block", self.block),
            ("monster_block", self.monster_block),
            ("energy", self.energy),
            ("gold", self.gold),
            ("power", self.power),
            ("derived_power", self.derived_power),
            ("debuff", self.debuff),
            ("focus", self.focus),
            ("hand", self.hand),
            ("draw", self.draw),
            ("discard", self.discard),
            ("exhaust", self.exhaust),
            ("deck", self.deck),
            ("cards_discarded", self.cards_discarded),
            ("times_damaged", self.times_damaged),
            ("times_damaged_global", self.times_damaged_global),
            ("turn", self.turn),
            ("card_cost", self.card_cost),
            ("total_cost", self.total_cost),
            ("pile_total_cost", self.pile_total_cost),
            ("upgrades", self.upgrades),
            ("damage", self.damage),
            ("monster_hp", self.monster_hp),
            ("move_id", self.move_id),
            ("relics", self.relics),
            ("relic_unknown", self.relic_unknown),
            ("potion_slots", self.potion_slots),
            ("active_powers", self.active_powers),
            ("floor", self.floor),
            ("act", self.act),
            ("ascension", self.ascension),
            ("map_nodes", self.map_nodes),
            ("map_coordinate", self.map_coordinate),
            ("reachable", self.reachable),
            ("adjacency", self.adjacency),
            ("purge_cost", self.purge_cost),
            ("limbo", self.limbo),
            ("symbol_monster", self.symbol_monster),
            ("symbol_elite", self.symbol_elite),
            ("symbol_boss", self.symbol_boss),
            ("symbol_event", self.symbol_event),
            ("symbol_shop", self.symbol_shop),
            ("symbol_rest", self.symbol_rest),
            ("symbol_treasure", self.symbol_treasure),
            ("symbol_other", self.symbol_other),
            ("multi_hot", self.multi_hot),
        ]
    }
}

impl Default for Ceilings {
    fn default() -> Self {
        CEILINGS
    }
}
