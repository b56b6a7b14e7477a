//! Player powers block.

use crate::catalog::{Category, IdentifierRegistry};
use crate::frame::PlayerView;
use crate::schema::blocks::PLAYER_POWERS;
use crate::schema::CEILINGS;

use super::norm::clamp_norm;
use super::powers::PowerSummary;

/// Accumulated magnitude per power plus derived stat sums.
///
/// Each power adds `max(|amount|, 1)` at its catalog index, so a stackless
/// power still registers. Unknown powers land on index 0.
pub fn encode_player_powers(registry: &IdentifierRegistry, player: &PlayerView<'_>, out: &mut [f32]) {
    let l = &PLAYER_POWERS;
    let c = &CEILINGS;

    let magnitudes = l.magnitudes.of_mut(out);
    for power in player.powers() {
        let index = registry.index(Category::Powers, power.id());
        magnitudes[index] += power.amount().abs().max(1.0);
    }
    for v in magnitudes.iter_mut() {
        *v = clamp_norm(*v, c.power);
    }

    let summary = PowerSummary::parse(player.powers());
    l.strength_pos
        .set(out, clamp_norm(summary.strength, c.derived_power));
    l.strength_neg
        .set(out, clamp_norm(-summary.strength, c.derived_power));
    l.dexterity_pos
        .set(out, clamp_norm(summary.dexterity, c.derived_power));
    l.dexterity_neg
        .set(out, clamp_norm(-summary.dexterity, c.derived_power));
    l.weak.set(out, clamp_norm(summary.weak, c.debuff));
    l.vulnerable.set(out, clamp_norm(summary.vulnerable, c.debuff));
    l.frail.set(out, clamp_norm(summary.frail, c.debuff));
    l.focus.set(out, clamp_norm(summary.focus, c.focus));
    l.active_count
        .set(out, clamp_norm(summary.active as f32, c.active_powers));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UNKNOWN_INDEX;
    use crate::frame::FrameView;
    use serde_json::json;

    fn encode(powers: serde_json::Value) -> Vec<f32> {
        let frame = json!({"combat_state": {"player": {"powers": powers}}});
        let view = FrameView::new(&frame);
        let mut out = vec![0.0; PLAYER_POWERS.len];
        encode_player_powers(
            IdentifierRegistry::builtin(),
            &view.combat().unwrap().player(),
            &mut out,
        );
        out
    }

    #[test]
    fn test_magnitudes_and_derived() {
        let registry = IdentifierRegistry::builtin();
        let out = encode(json!([
            {"id": "Strength", "amount": 3},
            {"id": "Barricade", "amount": 0},
            {"id": "Dexterity", "amount": -2},
            {"id": "Vulnerable", "amount": 2},
        ]));
        let strength = registry.index(Category::Powers, "Strength");
        let barricade = registry.index(Category::Powers, "Barricade");
        assert_eq!(out[PLAYER_POWERS.magnitudes.start + strength], 3.0 / 99.0);
        assert_eq!(out[PLAYER_POWERS.magnitudes.start + barricade], 1.0 / 99.0);
        assert_eq!(out[PLAYER_POWERS.strength_pos.start], 0.1);
        assert_eq!(out[PLAYER_POWERS.strength_neg.start], 0.0);
        assert_eq!(out[PLAYER_POWERS.dexterity_neg.start], 2.0 / 30.0);
        assert_eq!(out[PLAYER_POWERS.vulnerable.start], 2.0 / 15.0);
        assert_eq!(out[PLAYER_POWERS.active_count.start], 4.0 / 20.0);
    }

    #[test]
    fn test_unknown_power_accumulates_at_zero() {
        let out = encode(json!([
            {"id": "Totally New Power", "amount": 2},
            {"id": "Another One", "amount": -5},
        ]));
        assert_eq!(out[PLAYER_POWERS.magnitudes.start + UNKNOWN_INDEX], 7.0 / 99.0);
    }

    #[test]
    fn test_no_powers() {
        let out = encode(json!([]));
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
