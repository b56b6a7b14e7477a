//! Internal layout of every block.
//!
//! Block-level spans are relative to the block's own slice. Per-record
//! layouts (card slot, monster slot, potion slot, pile statistics) are
//! relative to the record's start, so one layout serves every slot.

use crate::catalog::Category;

use super::layout::{Cursor, Span};

/// Character classes, in one-hot order.
pub const CLASSES: [&str; 4] = ["IRONCLAD", "THE_SILENT", "DEFECT", "WATCHER"];

/// Room phases, in one-hot order.
pub const ROOM_PHASES: [&str; 4] = ["COMBAT", "EVENT", "COMPLETE", "INCOMPLETE"];

/// Screen types, in one-hot order.
pub const SCREEN_TYPES: [&str; 14] = [
    "NONE",
    "EVENT",
    "CHEST",
    "SHOP_ROOM",
    "REST",
    "CARD_REWARD",
    "COMBAT_REWARD",
    "MAP",
    "BOSS_REWARD",
    "SHOP_SCREEN",
    "GRID",
    "HAND_SELECT",
    "GAME_OVER",
    "COMPLETE",
];

/// Command families, in flag order.
pub const COMMANDS: [&str; 8] = [
    "play", "end", "potion", "choose", "proceed", "return", "confirm", "cancel",
];

/// Map room symbols, in one-hot order.
pub const MAP_SYMBOLS: [&str; 7] = ["M", "E", "B", "?", "$", "R", "T"];

/// Card types tracked by pile and deck composition features.
pub const COMPOSITION_TYPES: [&str; 5] = ["ATTACK", "SKILL", "POWER", "STATUS", "CURSE"];

/// Reward kinds flagged in the global block.
pub const REWARD_KINDS: [&str; 4] = ["CARD", "POTION", "GOLD", "RELIC"];

/// Three-way monster classification, in one-hot order.
pub const MONSTER_KINDS: usize = 3;

// ----------------------------------------------------------------------------
// Player core
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerCoreLayout {
    pub hp_ratio: Span,
    pub current_hp: Span,
    pub max_hp: Span,
    pub block: Span,
    pub energy: Span,
    pub max_energy: Span,
    pub gold: Span,
    pub cards_discarded: Span,
    pub times_damaged: Span,
    pub hand_count: Span,
    pub draw_count: Span,
    pub discard_count: Span,
    pub exhaust_count: Span,
    pub ruby_key: Span,
    pub emerald_key: Span,
    pub sapphire_key: Span,
    pub turn: Span,
    pub reserved: Span,
    /// Declared block length.
    pub len: usize,
    /// Where the cursor actually stopped.
    pub end: usize,
}

impl PlayerCoreLayout {
    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (hp_ratio, c) = c.take(1);
        let (current_hp, c) = c.take(1);
        let (max_hp, c) = c.take(1);
        let (block, c) = c.take(1);
        let (energy, c) = c.take(1);
        let (max_energy, c) = c.take(1);
        let (gold, c) = c.take(1);
        let (cards_discarded, c) = c.take(1);
        let (times_damaged, c) = c.take(1);
        let (hand_count, c) = c.take(1);
        let (draw_count, c) = c.take(1);
        let (discard_count, c) = c.take(1);
        let (exhaust_count, c) = c.take(1);
        let (ruby_key, c) = c.take(1);
        let (emerald_key, c) = c.take(1);
        let (sapphire_key, c) = c.take(1);
        let (turn, c) = c.take(1);
        let (reserved, c) = c.rest(len);
        Self {
            hp_ratio,
            current_hp,
            max_hp,
            block,
            energy,
            max_energy,
            gold,
            cards_discarded,
            times_damaged,
            hand_count,
            draw_count,
            discard_count,
            exhaust_count,
            ruby_key,
            emerald_key,
            sapphire_key,
            turn,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const PLAYER_CORE: PlayerCoreLayout = PlayerCoreLayout::build(17);

// ----------------------------------------------------------------------------
// Cards and piles
// ----------------------------------------------------------------------------

/// One hand card, relative to the slot start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardSlotLayout {
    pub cost: Span,
    pub playable: Span,
    pub has_target: Span,
    pub ethereal: Span,
    pub exhausts: Span,
    pub x_cost: Span,
    pub upgraded: Span,
    pub upgrades: Span,
    pub card_type: Span,
    pub rarity: Span,
    pub stride: usize,
}

impl CardSlotLayout {
    const fn build() -> Self {
        let c = Cursor::new();
        let (cost, c) = c.take(1);
        let (playable, c) = c.take(1);
        let (has_target, c) = c.take(1);
        let (ethereal, c) = c.take(1);
        let (exhausts, c) = c.take(1);
        let (x_cost, c) = c.take(1);
        let (upgraded, c) = c.take(1);
        let (upgrades, c) = c.take(1);
        let (card_type, c) = c.take(Category::CardTypes.dim());
        let (rarity, c) = c.take(Category::Rarities.dim());
        Self {
            cost,
            playable,
            has_target,
            ethereal,
            exhausts,
            x_cost,
            upgraded,
            upgrades,
            card_type,
            rarity,
            stride: c.position(),
        }
    }
}

pub const CARD_SLOT: CardSlotLayout = CardSlotLayout::build();

/// Aggregate statistics over a card pile, relative to the stats start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PileStatsLayout {
    pub size: Span,
    pub zero_cost: Span,
    pub zero_cost_ratio: Span,
    pub attack: Span,
    pub attack_ratio: Span,
    pub skill: Span,
    pub skill_ratio: Span,
    pub power: Span,
    pub power_ratio: Span,
    pub status_curse: Span,
    pub status_curse_ratio: Span,
    pub upgraded: Span,
    pub upgraded_ratio: Span,
    pub ethereal: Span,
    pub exhausts: Span,
    pub avg_cost: Span,
    pub total_cost: Span,
    pub len: usize,
}

impl PileStatsLayout {
    const fn build() -> Self {
        let c = Cursor::new();
        let (size, c) = c.take(1);
        let (zero_cost, c) = c.take(1);
        let (zero_cost_ratio, c) = c.take(1);
        let (attack, c) = c.take(1);
        let (attack_ratio, c) = c.take(1);
        let (skill, c) = c.take(1);
        let (skill_ratio, c) = c.take(1);
        let (power, c) = c.take(1);
        let (power_ratio, c) = c.take(1);
        let (status_curse, c) = c.take(1);
        let (status_curse_ratio, c) = c.take(1);
        let (upgraded, c) = c.take(1);
        let (upgraded_ratio, c) = c.take(1);
        let (ethereal, c) = c.take(1);
        let (exhausts, c) = c.take(1);
        let (avg_cost, c) = c.take(1);
        let (total_cost, c) = c.take(1);
        Self {
            size,
            zero_cost,
            zero_cost_ratio,
            attack,
            attack_ratio,
            skill,
            skill_ratio,
            power,
            power_ratio,
            status_curse,
            status_curse_ratio,
            upgraded,
            upgraded_ratio,
            ethereal,
            exhausts,
            avg_cost,
            total_cost,
            len: c.position(),
        }
    }
}

pub const PILE_STATS: PileStatsLayout = PileStatsLayout::build();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandLayout {
    pub cards: Span,
    pub slots: Span,
    pub slot_count: usize,
    pub stats: Span,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl HandLayout {
    /// Cards beyond this many get no per-slot detail.
    pub const MAX_SLOTS: usize = 10;

    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (cards, c) = c.take(Category::Cards.dim());
        let (slots, c) = c.repeat(CARD_SLOT.stride, Self::MAX_SLOTS);
        let (stats, c) = c.take(PILE_STATS.len);
        let (reserved, c) = c.rest(len);
        Self {
            cards,
            slots,
            slot_count: Self::MAX_SLOTS,
            stats,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const HAND: HandLayout = HandLayout::build(390);

/// Draw, discard and exhaust piles: multi-hot, stats, reserved tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PileLayout {
    pub cards: Span,
    pub stats: Span,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl PileLayout {
    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (cards, c) = c.take(Category::Cards.dim());
        let (stats, c) = c.take(PILE_STATS.len);
        let (reserved, c) = c.rest(len);
        Self {
            cards,
            stats,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const DRAW_PILE: PileLayout = PileLayout::build(340);
pub const DISCARD_PILE: PileLayout = PileLayout::build(340);
pub const EXHAUST_PILE: PileLayout = PileLayout::build(240);

// ----------------------------------------------------------------------------
// Player powers
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPowersLayout {
    pub magnitudes: Span,
    pub strength_pos: Span,
    pub strength_neg: Span,
    pub dexterity_pos: Span,
    pub dexterity_neg: Span,
    pub weak: Span,
    pub vulnerable: Span,
    pub frail: Span,
    pub focus: Span,
    pub active_count: Span,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl PlayerPowersLayout {
    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (magnitudes, c) = c.take(Category::Powers.dim());
        let (strength_pos, c) = c.take(1);
        let (strength_neg, c) = c.take(1);
        let (dexterity_pos, c) = c.take(1);
        let (dexterity_neg, c) = c.take(1);
        let (weak, c) = c.take(1);
        let (vulnerable, c) = c.take(1);
        let (frail, c) = c.take(1);
        let (focus, c) = c.take(1);
        let (active_count, c) = c.take(1);
        let (reserved, c) = c.rest(len);
        Self {
            magnitudes,
            strength_pos,
            strength_neg,
            dexterity_pos,
            dexterity_neg,
            weak,
            vulnerable,
            frail,
            focus,
            active_count,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const PLAYER_POWERS: PlayerPowersLayout = PlayerPowersLayout::build(100);

// ----------------------------------------------------------------------------
// Monsters
// ----------------------------------------------------------------------------

/// One monster, relative to the slot start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterSlotLayout {
    pub identity: Span,
    pub hp_ratio: Span,
    pub block: Span,
    pub kind: Span,
    pub move_id: Span,
    pub max_hp: Span,
    pub pad: Span,
    pub intent: Span,
    pub predicted_damage: Span,
    pub alive: Span,
    pub half_dead: Span,
    pub last_move: Span,
    pub second_last_move: Span,
    pub strength: Span,
    pub vulnerable: Span,
    pub stride: usize,
}

impl MonsterSlotLayout {
    const fn build() -> Self {
        let c = Cursor::new();
        let (identity, c) = c.take(Category::Monsters.dim());
        let (hp_ratio, c) = c.take(1);
        let (block, c) = c.take(1);
        let (kind, c) = c.take(MONSTER_KINDS);
        let (move_id, c) = c.take(1);
        let (max_hp, c) = c.take(1);
        let (pad, c) = c.take(1);
        let (intent, c) = c.take(Category::Intents.dim());
        let (predicted_damage, c) = c.take(1);
        let (alive, c) = c.take(1);
        let (half_dead, c) = c.take(1);
        let (last_move, c) = c.take(1);
        let (second_last_move, c) = c.take(1);
        let (strength, c) = c.take(1);
        let (vulnerable, c) = c.take(1);
        Self {
            identity,
            hp_ratio,
            block,
            kind,
            move_id,
            max_hp,
            pad,
            intent,
            predicted_damage,
            alive,
            half_dead,
            last_move,
            second_last_move,
            strength,
            vulnerable,
            stride: c.position(),
        }
    }
}

pub const MONSTER_SLOT: MonsterSlotLayout = MonsterSlotLayout::build();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonstersLayout {
    pub slots: Span,
    pub slot_count: usize,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl MonstersLayout {
    pub const MAX_SLOTS: usize = 6;

    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (slots, c) = c.repeat(MONSTER_SLOT.stride, Self::MAX_SLOTS);
        let (reserved, c) = c.rest(len);
        Self {
            slots,
            slot_count: Self::MAX_SLOTS,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const MONSTERS: MonstersLayout = MonstersLayout::build(618);

// ----------------------------------------------------------------------------
// Relics and potions
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelicsLayout {
    pub owned: Span,
    pub total: Span,
    pub with_counter: Span,
    pub unknown: Span,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl RelicsLayout {
    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (owned, c) = c.take(Category::Relics.dim());
        let (total, c) = c.take(1);
        let (with_counter, c) = c.take(1);
        let (unknown, c) = c.take(1);
        let (reserved, c) = c.rest(len);
        Self {
            owned,
            total,
            with_counter,
            unknown,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const RELICS: RelicsLayout = RelicsLayout::build(200);

/// One potion belt slot, relative to the slot start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PotionSlotLayout {
    pub occupied: Span,
    pub can_use: Span,
    pub can_discard: Span,
    pub requires_target: Span,
    pub id: Span,
    pub stride: usize,
}

impl PotionSlotLayout {
    const fn build() -> Self {
        let c = Cursor::new();
        let (occupied, c) = c.take(1);
        let (can_use, c) = c.take(1);
        let (can_discard, c) = c.take(1);
        let (requires_target, c) = c.take(1);
        let (id, c) = c.take(1);
        Self {
            occupied,
            can_use,
            can_discard,
            requires_target,
            id,
            stride: c.position(),
        }
    }
}

pub const POTION_SLOT: PotionSlotLayout = PotionSlotLayout::build();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PotionsLayout {
    pub owned: Span,
    pub slots: Span,
    pub slot_count: usize,
    pub filled: Span,
    pub usable: Span,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl PotionsLayout {
    pub const MAX_SLOTS: usize = 5;

    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (owned, c) = c.take(Category::Potions.dim());
        let (slots, c) = c.repeat(POTION_SLOT.stride, Self::MAX_SLOTS);
        let (filled, c) = c.take(1);
        let (usable, c) = c.take(1);
        let (reserved, c) = c.rest(len);
        Self {
            owned,
            slots,
            slot_count: Self::MAX_SLOTS,
            filled,
            usable,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const POTIONS: PotionsLayout = PotionsLayout::build(200);

// ----------------------------------------------------------------------------
// Global / meta
// ----------------------------------------------------------------------------

/// Map summary, block-relative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapLayout {
    pub explored: Span,
    /// One per symbol plus a trailing "other" bucket.
    pub histogram: Span,
    pub reachable: Span,
    pub reachable_count: Span,
    pub current_x: Span,
    pub current_y: Span,
    pub current_symbol: Span,
    pub children: Span,
    pub parents: Span,
    pub pad: Span,
}

impl MapLayout {
    const fn build(c: Cursor) -> (Self, Cursor) {
        let (explored, c) = c.take(1);
        let (histogram, c) = c.take(MAP_SYMBOLS.len() + 1);
        let (reachable, c) = c.take(MAP_SYMBOLS.len());
        let (reachable_count, c) = c.take(1);
        let (current_x, c) = c.take(1);
        let (current_y, c) = c.take(1);
        let (current_symbol, c) = c.take(MAP_SYMBOLS.len());
        let (children, c) = c.take(1);
        let (parents, c) = c.take(1);
        let (pad, c) = c.take(1);
        let layout = Self {
            explored,
            histogram,
            reachable,
            reachable_count,
            current_x,
            current_y,
            current_symbol,
            children,
            parents,
            pad,
        };
        (layout, c)
    }
}

/// Opportunistic screen and combat fields, block-relative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtrasLayout {
    pub purge_available: Span,
    pub purge_cost: Span,
    pub card_in_play: Span,
    pub card_in_play_upgraded: Span,
    pub times_damaged: Span,
    pub rewards: Span,
}

impl ExtrasLayout {
    const fn build(c: Cursor) -> (Self, Cursor) {
        let (purge_available, c) = c.take(1);
        let (purge_cost, c) = c.take(1);
        let (card_in_play, c) = c.take(1);
        let (card_in_play_upgraded, c) = c.take(1);
        let (times_damaged, c) = c.take(1);
        let (rewards, c) = c.take(REWARD_KINDS.len());
        let layout = Self {
            purge_available,
            purge_cost,
            card_in_play,
            card_in_play_upgraded,
            times_damaged,
            rewards,
        };
        (layout, c)
    }
}

/// Derived combat statistics, block-relative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DynamicsLayout {
    pub limbo_count: Span,
    pub limbo_first: Span,
    pub limbo_has_attack: Span,
    /// Two entries per monster slot: last move, second-to-last move.
    pub move_history: Span,
    pub predicted: Span,
    pub incoming_total: Span,
    pub incoming_unblocked: Span,
    /// Buckets: 0, 1, 2, 3+, X, unplayable.
    pub cost_histogram: Span,
}

impl DynamicsLayout {
    pub const COST_BUCKETS: usize = 6;

    const fn build(c: Cursor) -> (Self, Cursor) {
        let (limbo_count, c) = c.take(1);
        let (limbo_first, c) = c.take(1);
        let (limbo_has_attack, c) = c.take(1);
        let (move_history, c) = c.repeat(2, MonstersLayout::MAX_SLOTS);
        let (predicted, c) = c.take(MonstersLayout::MAX_SLOTS);
        let (incoming_total, c) = c.take(1);
        let (incoming_unblocked, c) = c.take(1);
        let (cost_histogram, c) = c.take(Self::COST_BUCKETS);
        let layout = Self {
            limbo_count,
            limbo_first,
            limbo_has_attack,
            move_history,
            predicted,
            incoming_total,
            incoming_unblocked,
            cost_histogram,
        };
        (layout, c)
    }
}

/// Master deck composition, block-relative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckLayout {
    pub size: Span,
    pub type_counts: Span,
    pub type_ratios: Span,
    pub upgraded: Span,
    pub upgraded_ratio: Span,
    pub avg_cost: Span,
}

impl DeckLayout {
    const fn build(c: Cursor) -> (Self, Cursor) {
        let (size, c) = c.take(1);
        let (type_counts, c) = c.take(COMPOSITION_TYPES.len());
        let (type_ratios, c) = c.take(COMPOSITION_TYPES.len());
        let (upgraded, c) = c.take(1);
        let (upgraded_ratio, c) = c.take(1);
        let (avg_cost, c) = c.take(1);
        let layout = Self {
            size,
            type_counts,
            type_ratios,
            upgraded,
            upgraded_ratio,
            avg_cost,
        };
        (layout, c)
    }
}

/// Exhaust pile composition, block-relative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExhaustMixLayout {
    pub size: Span,
    pub type_ratios: Span,
}

impl ExhaustMixLayout {
    const fn build(c: Cursor) -> (Self, Cursor) {
        let (size, c) = c.take(1);
        let (type_ratios, c) = c.take(COMPOSITION_TYPES.len());
        (Self { size, type_ratios }, c)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalLayout {
    pub floor: Span,
    pub act: Span,
    pub ascension: Span,
    pub in_combat: Span,
    pub class: Span,
    pub room_phase: Span,
    pub screen: Span,
    pub commands: Span,
    pub event: Span,
    pub room_subtype: Span,
    pub map: MapLayout,
    pub extras: ExtrasLayout,
    pub dynamics: DynamicsLayout,
    pub deck: DeckLayout,
    pub exhaust: ExhaustMixLayout,
    pub reserved: Span,
    pub len: usize,
    pub end: usize,
}

impl GlobalLayout {
    const fn build(len: usize) -> Self {
        let c = Cursor::new();
        let (floor, c) = c.take(1);
        let (act, c) = c.take(1);
        let (ascension, c) = c.take(1);
        let (in_combat, c) = c.take(1);
        let (class, c) = c.take(CLASSES.len());
        let (room_phase, c) = c.take(ROOM_PHASES.len());
        let (screen, c) = c.take(SCREEN_TYPES.len());
        let (commands, c) = c.take(COMMANDS.len());
        let (event, c) = c.take(Category::Events.dim());
        let (room_subtype, c) = c.take(Category::RoomSubtypes.dim());
        let (map, c) = MapLayout::build(c);
        let (extras, c) = ExtrasLayout::build(c);
        let (dynamics, c) = DynamicsLayout::build(c);
        let (deck, c) = DeckLayout::build(c);
        let (exhaust, c) = ExhaustMixLayout::build(c);
        let (reserved, c) = c.rest(len);
        Self {
            floor,
            act,
            ascension,
            in_combat,
            class,
            room_phase,
            screen,
            commands,
            event,
            room_subtype,
            map,
            extras,
            dynamics,
            deck,
            exhaust,
            reserved,
            len,
            end: c.position(),
        }
    }
}

pub const GLOBAL: GlobalLayout = GlobalLayout::build(500);
