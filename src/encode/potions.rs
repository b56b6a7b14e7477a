//! Potions block.

use crate::catalog::{normalize, Category, IdentifierRegistry};
use crate::frame::{FrameView, PotionView};
use crate::schema::blocks::{POTIONS, POTION_SLOT};
use crate::schema::CEILINGS;

use super::norm::{clamp_norm, flag, multi_hot, saturate};

/// The protocol fills unused belt positions with this placeholder.
fn is_empty_slot(potion: &PotionView<'_>) -> bool {
    let key = normalize(potion.id());
    key.is_empty() || key == "potion_slot"
}

/// Belt multi-hot, per-slot usability, filled and usable counts.
///
/// Slot `i` mirrors belt position `i`, so an empty position leaves its
/// slot zero without shifting the potions after it.
pub fn encode_potions(registry: &IdentifierRegistry, frame: &FrameView<'_>, out: &mut [f32]) {
    let l = &POTIONS;
    let s = &POTION_SLOT;
    let c = &CEILINGS;
    let id_ceiling = (Category::Potions.dim() - 1) as f32;
    let (mut filled, mut usable) = (0usize, 0usize);

    for potion in frame.potions().filter(|p| !is_empty_slot(p)) {
        filled += 1;
        if potion.can_use() {
            usable += 1;
        }
        multi_hot(l.owned.of_mut(out), registry.index(Category::Potions, potion.id()));
    }
    saturate(l.owned.of_mut(out), c.multi_hot);

    let slots = l.slots.of_mut(out).chunks_exact_mut(s.stride);
    for (potion, slot) in frame.potions().zip(slots) {
        if is_empty_slot(&potion) {
            continue;
        }
        let index = registry.index(Category::Potions, potion.id());
        s.occupied.set(slot, 1.0);
        s.can_use.set(slot, flag(potion.can_use()));
        s.can_discard.set(slot, flag(potion.can_discard()));
        s.requires_target.set(slot, flag(potion.requires_target()));
        s.id.set(slot, clamp_norm(index as f32, id_ceiling));
    }

    l.filled.set(out, clamp_norm(filled as f32, c.potion_slots));
    l.usable.set(out, clamp_norm(usable as f32, c.potion_slots));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(frame: serde_json::Value) -> Vec<f32> {
        let mut out = vec![0.0; POTIONS.len];
        encode_potions(IdentifierRegistry::builtin(), &FrameView::new(&frame), &mut out);
        out
    }

    #[test]
    fn test_empty_slots_ignored() {
        let registry = IdentifierRegistry::builtin();
        let out = encode(json!({"potions": [
            {"id": "Potion Slot", "name": "Potion Slot", "can_use": false},
            {"id": "Fire Potion", "can_use": true, "can_discard": true, "requires_target": true},
            {"id": "Potion Slot"},
        ]}));
        let fire = registry.index(Category::Potions, "Fire Potion");
        assert_eq!(POTIONS.owned.of(&out).iter().sum::<f32>(), 1.0);
        assert_eq!(out[POTIONS.owned.start + fire], 1.0);

        let slot0 = POTIONS.slots.slot(POTION_SLOT.stride, 0).of(&out);
        assert!(slot0.iter().all(|&v| v == 0.0));
        let slot1 = POTIONS.slots.slot(POTION_SLOT.stride, 1).of(&out);
        assert_eq!(slot1[POTION_SLOT.occupied.start], 1.0);
        assert_eq!(slot1[POTION_SLOT.can_use.start], 1.0);
        assert_eq!(slot1[POTION_SLOT.requires_target.start], 1.0);
        assert_eq!(slot1[POTION_SLOT.id.start], fire as f32 / 44.0);

        assert_eq!(out[POTIONS.filled.start], 1.0 / 5.0);
        assert_eq!(out[POTIONS.usable.start], 1.0 / 5.0);
    }

    #[test]
    fn test_no_potions() {
        let out = encode(json!({}));
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
