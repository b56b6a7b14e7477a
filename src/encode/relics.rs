//! Relics block.

use crate::catalog::{Category, IdentifierRegistry, UNKNOWN_INDEX};
use crate::frame::FrameView;
use crate::schema::blocks::RELICS;
use crate::schema::CEILINGS;

use super::norm::{clamp_norm, multi_hot, saturate};

pub fn encode_relics(registry: &IdentifierRegistry, frame: &FrameView<'_>, out: &mut [f32]) {
    let l = &RELICS;
    let c = &CEILINGS;
    let (mut total, mut with_counter, mut unknown) = (0usize, 0usize, 0usize);

    let owned = l.owned.of_mut(out);
    for relic in frame.relics() {
        let index = registry.index(Category::Relics, relic.id());
        multi_hot(owned, index);
        total += 1;
        if relic.counter() >= 0 {
            with_counter += 1;
        }
        if index == UNKNOWN_INDEX {
            unknown += 1;
        }
    }
    saturate(owned, c.multi_hot);

    l.total.set(out, clamp_norm(total as f32, c.relics));
    l.with_counter
        .set(out, clamp_norm(with_counter as f32, c.relics));
    l.unknown.set(out, clamp_norm(unknown as f32, c.relic_unknown));
}
