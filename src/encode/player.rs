//! Player core block.

use crate::frame::FrameView;
use crate::schema::blocks::PLAYER_CORE;
use crate::schema::CEILINGS;

use super::norm::{clamp_norm, flag};

/// Vitals, currency, per-turn counters, pile sizes and keys.
///
/// Health comes from the combat player record when there is one, else from
/// the outer game state. Everything else combat-scoped stays zero outside
/// combat.
pub fn encode_player_core(frame: &FrameView<'_>, out: &mut [f32]) {
    let l = &PLAYER_CORE;
    let c = &CEILINGS;
    let combat = frame.combat();
    let player = combat.map(|cs| cs.player());

    let current_hp = player
        .and_then(|p| p.current_hp())
        .unwrap_or_else(|| frame.current_hp());
    let max_hp = player
        .and_then(|p| p.max_hp())
        .unwrap_or_else(|| frame.max_hp());

    let hp_ratio = if max_hp > 0.0 {
        clamp_norm(current_hp, max_hp)
    } else {
        0.0
    };
    l.hp_ratio.set(out, hp_ratio);
    l.current_hp.set(out, clamp_norm(current_hp, c.hp));
    l.max_hp.set(out, clamp_norm(max_hp, c.hp));
    l.gold.set(out, clamp_norm(frame.gold(), c.gold));

    if let (Some(combat), Some(player)) = (combat, player) {
        l.block.set(out, clamp_norm(player.block(), c.block));
        l.energy.set(out, clamp_norm(player.energy(), c.energy));
        l.max_energy.set(out, clamp_norm(player.max_energy(), c.energy));
        l.cards_discarded
            .set(out, clamp_norm(combat.cards_discarded_this_turn(), c.cards_discarded));
        l.times_damaged
            .set(out, clamp_norm(combat.times_damaged(), c.times_damaged));
        l.hand_count
            .set(out, clamp_norm(combat.hand_count() as f32, c.hand));
        l.draw_count
            .set(out, clamp_norm(combat.draw_count() as f32, c.draw));
        l.discard_count
            .set(out, clamp_norm(combat.discard_count() as f32, c.discard));
        l.exhaust_count
            .set(out, clamp_norm(combat.exhaust_count() as f32, c.exhaust));
        l.turn.set(out, clamp_norm(combat.turn(), c.turn));
    }

    l.ruby_key.set(out, flag(frame.has_key("ruby")));
    l.emerald_key.set(out, flag(frame.has_key("emerald")));
    l.sapphire_key.set(out, flag(frame.has_key("sapphire")));
}
