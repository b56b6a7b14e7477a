//! Global / meta block.

use smallvec::SmallVec;

use crate::catalog::{normalize, Category, IdentifierRegistry, UNKNOWN_INDEX};
use crate::frame::{CombatView, FrameView};
use crate::schema::blocks::{
    DynamicsLayout, MonstersLayout, CLASSES, COMMANDS, GLOBAL, REWARD_KINDS, ROOM_PHASES,
    SCREEN_TYPES,
};
use crate::schema::CEILINGS;

use super::classify::room_subtype;
use super::map::encode_map;
use super::monsters::predicted_damage;
use super::norm::{clamp_norm, flag, named_index, one_hot, one_hot_named, ratio};
use super::piles::{CardKind, CardMix};

/// Flag position of a protocol command. Commands with no policy meaning
/// (`key`, `click`, `wait`, `state`) have none.
fn command_index(command: &str) -> Option<usize> {
    named_index(&COMMANDS, command)
}

/// Position of a card id in the card catalog, scaled into `[0, 1]`.
fn card_position(registry: &IdentifierRegistry, id: &str) -> f32 {
    let index = registry.index(Category::Cards, id);
    clamp_norm(index as f32, (Category::Cards.dim() - 1) as f32)
}

/// Progress, phase and screen, available commands, event, room subtype,
/// map summary, opportunistic screen fields and derived combat and deck
/// statistics.
pub fn encode_global(registry: &IdentifierRegistry, frame: &FrameView<'_>, out: &mut [f32]) {
    let g = &GLOBAL;
    let c = &CEILINGS;
    let combat = frame.combat();

    g.floor.set(out, clamp_norm(frame.floor(), c.floor));
    g.act.set(out, clamp_norm(frame.act(), c.act));
    g.ascension.set(out, clamp_norm(frame.ascension(), c.ascension));
    g.in_combat.set(out, flag(combat.is_some()));

    one_hot_named(g.class.of_mut(out), &CLASSES, frame.class());
    one_hot_named(g.room_phase.of_mut(out), &ROOM_PHASES, frame.room_phase());
    one_hot_named(g.screen.of_mut(out), &SCREEN_TYPES, frame.screen_type());

    let commands = g.commands.of_mut(out);
    for command in frame.available_commands() {
        if let Some(i) = command_index(command) {
            one_hot(commands, i);
        }
    }

    let screen = frame.screen();
    let event = screen.event_id();
    if !event.trim().is_empty() {
        one_hot(g.event.of_mut(out), registry.index(Category::Events, event));
    }

    let subtype = registry.index(Category::RoomSubtypes, room_subtype(frame));
    if subtype != UNKNOWN_INDEX {
        one_hot(g.room_subtype.of_mut(out), subtype);
    }

    encode_map(frame, &g.map, out);

    let x = &g.extras;
    x.purge_available.set(out, flag(screen.purge_available()));
    x.purge_cost
        .set(out, clamp_norm(screen.purge_cost(), c.purge_cost));
    let rewards = x.rewards.of_mut(out);
    for reward in screen.rewards() {
        let kind = reward.reward_type();
        let kind = if normalize(kind) == "stolen_gold" {
            "GOLD"
        } else {
            kind
        };
        one_hot_named(rewards, &REWARD_KINDS, kind);
    }

    if let Some(combat) = combat {
        if let Some(card) = combat.card_in_play() {
            x.card_in_play.set(out, card_position(registry, card.id()));
            x.card_in_play_upgraded.set(out, flag(card.upgrades() > 0));
        }
        x.times_damaged
            .set(out, clamp_norm(combat.times_damaged(), c.times_damaged_global));
        encode_dynamics(registry, &combat, &g.dynamics, out);

        let exhaust = CardMix::tally(combat.exhaust_pile());
        g.exhaust
            .size
            .set(out, clamp_norm(exhaust.size as f32, c.exhaust));
        let ratios = g.exhaust.type_ratios.of_mut(out);
        for (slot, count) in ratios.iter_mut().zip(exhaust.kinds) {
            *slot = ratio(count, exhaust.size);
        }
    }

    let deck = CardMix::tally(frame.deck());
    let d = &g.deck;
    d.size.set(out, clamp_norm(deck.size as f32, c.deck));
    for (slot, count) in d.type_counts.of_mut(out).iter_mut().zip(deck.kinds) {
        *slot = clamp_norm(count as f32, c.deck);
    }
    for (slot, count) in d.type_ratios.of_mut(out).iter_mut().zip(deck.kinds) {
        *slot = ratio(count, deck.size);
    }
    d.upgraded
        .set(out, clamp_norm(deck.upgraded as f32, c.deck));
    d.upgraded_ratio.set(out, ratio(deck.upgraded, deck.size));
    d.avg_cost
        .set(out, clamp_norm(deck.avg_cost(), c.card_cost));
}

/// Limbo, per-monster history and incoming damage, hand cost histogram.
fn encode_dynamics(
    registry: &IdentifierRegistry,
    combat: &CombatView<'_>,
    layout: &DynamicsLayout,
    out: &mut [f32],
) {
    let c = &CEILINGS;

    let limbo = CardMix::tally(combat.limbo());
    layout
        .limbo_count
        .set(out, clamp_norm(limbo.size as f32, c.limbo));
    if let Some(first) = combat.limbo().next() {
        layout.limbo_first.set(out, card_position(registry, first.id()));
    }
    layout
        .limbo_has_attack
        .set(out, flag(limbo.kind(CardKind::Attack) > 0));

    let history = layout.move_history.of_mut(out);
    for (monster, pair) in combat.monsters().zip(history.chunks_exact_mut(2)) {
        pair[0] = clamp_norm(monster.last_move_id(), c.move_id);
        pair[1] = clamp_norm(monster.second_last_move_id(), c.move_id);
    }

    let damages: SmallVec<[f32; MonstersLayout::MAX_SLOTS]> =
        combat.monsters().map(|m| predicted_damage(&m)).collect();
    let incoming: f32 = damages.iter().sum();
    for (slot, damage) in layout.predicted.of_mut(out).iter_mut().zip(&damages) {
        *slot = clamp_norm(*damage, c.damage);
    }
    let unblocked = (incoming - combat.player().block()).max(0.0);
    layout
        .incoming_total
        .set(out, clamp_norm(incoming, c.damage));
    layout
        .incoming_unblocked
        .set(out, clamp_norm(unblocked, c.damage));

    let mut buckets = [0usize; DynamicsLayout::COST_BUCKETS];
    for card in combat.hand() {
        let bucket = match card.cost() {
            -1 => 4,
            cost if cost < 0 => 5,
            cost => (cost as usize).min(3),
        };
        buckets[bucket] += 1;
    }
    for (slot, count) in layout.cost_histogram.of_mut(out).iter_mut().zip(buckets) {
        *slot = clamp_norm(count as f32, c.hand);
    }
}
