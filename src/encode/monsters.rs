//! Monsters block.

use crate::catalog::{Category, IdentifierRegistry};
use crate::frame::{CombatView, MonsterView};
use crate::schema::blocks::{MONSTERS, MONSTER_SLOT};
use crate::schema::CEILINGS;

use super::classify::MonsterKind;
use super::norm::{clamp_norm, flag, one_hot};
use super::powers::PowerSummary;

/// Still in the fight: not gone and above zero HP, or half-dead (a
/// revivable Awakened One or Darkling).
#[must_use]
pub fn is_alive(monster: &MonsterView<'_>) -> bool {
    monster.half_dead() || (!monster.is_gone() && monster.current_hp() > 0.0)
}

/// Unclamped damage the monster's intent will deal, 0 for dead monsters.
#[must_use]
pub fn predicted_damage(monster: &MonsterView<'_>) -> f32 {
    if !is_alive(monster) {
        return 0.0;
    }
    monster.adjusted_damage().max(0.0) * monster.hits().max(1.0)
}

fn write_monster_slot(registry: &IdentifierRegistry, monster: &MonsterView<'_>, out: &mut [f32]) {
    let s = &MONSTER_SLOT;
    let c = &CEILINGS;

    one_hot(
        s.identity.of_mut(out),
        registry.index(Category::Monsters, monster.id()),
    );

    let max_hp = monster.max_hp();
    if max_hp > 0.0 {
        s.hp_ratio.set(out, clamp_norm(monster.current_hp(), max_hp));
    }
    s.block.set(out, clamp_norm(monster.block(), c.monster_block));
    one_hot(s.kind.of_mut(out), MonsterKind::of(monster).index());
    s.move_id.set(out, clamp_norm(monster.move_id(), c.move_id));
    s.max_hp.set(out, clamp_norm(max_hp, c.monster_hp));

    one_hot(
        s.intent.of_mut(out),
        registry.index(Category::Intents, monster.intent()),
    );
    s.predicted_damage
        .set(out, clamp_norm(predicted_damage(monster), c.damage));
    s.alive.set(out, flag(is_alive(monster)));
    s.half_dead.set(out, flag(monster.half_dead()));
    s.last_move
        .set(out, clamp_norm(monster.last_move_id(), c.move_id));
    s.second_last_move
        .set(out, clamp_norm(monster.second_last_move_id(), c.move_id));

    let powers = PowerSummary::parse(monster.powers());
    s.strength
        .set(out, clamp_norm(powers.strength, c.derived_power));
    s.vulnerable
        .set(out, clamp_norm(powers.vulnerable, c.debuff));
}

/// Up to six monster slots in protocol order; slot `i` is the monster a
/// targeted command addresses as `i`. Monsters past the last slot are
/// dropped and unused slots stay zero.
pub fn encode_monsters(registry: &IdentifierRegistry, combat: &CombatView<'_>, out: &mut [f32]) {
    let slots = MONSTERS.slots.of_mut(out).chunks_exact_mut(MONSTER_SLOT.stride);
    for (monster, slot) in combat.monsters().zip(slots) {
        write_monster_slot(registry, &monster, slot);
    }
}
