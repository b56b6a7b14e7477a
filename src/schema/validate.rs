//! Layout self-check.
//!
//! A wrong offset is a programming error, so nothing here returns a
//! `Result` to the encoding path: [`validate`] lists every problem for tests
//! and tooling, and [`self_check`] turns a non-empty list into a panic.

use crate::catalog::Category;

use super::blocks::{
    CARD_SLOT, DISCARD_PILE, DRAW_PILE, EXHAUST_PILE, GLOBAL, HAND, MONSTERS, MONSTER_SLOT,
    PILE_STATS, PLAYER_CORE, PLAYER_POWERS, POTIONS, POTION_SLOT, RELICS,
};
use super::ceilings::{Ceilings, CEILINGS};
use super::layout::{BlockId, Layout, Span, LAYOUT};

/// One inconsistency in a layout.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("first block {block} starts at {offset}, expected 0")]
    FirstOffset { block: BlockId, offset: usize },

    #[error("block #{index} is {found}, expected {expected}")]
    OutOfOrder {
        index: usize,
        expected: BlockId,
        found: BlockId,
    },

    #[error("gap between {prev} (ends {prev_end}) and {next} (starts {next_start})")]
    Gap {
        prev: BlockId,
        next: BlockId,
        prev_end: usize,
        next_start: usize,
    },

    #[error("{prev} (ends {prev_end}) overlaps {next} (starts {next_start})")]
    Overlap {
        prev: BlockId,
        next: BlockId,
        prev_end: usize,
        next_start: usize,
    },

    #[error("block lengths sum to {sum}, declared dimension is {declared}")]
    TotalMismatch { declared: usize, sum: usize },

    #[error("{block} reserves {reserved} of only {len} positions")]
    ReservedTooLarge {
        block: BlockId,
        reserved: usize,
        len: usize,
    },

    #[error("{block} sub-layout covers {covered} positions, block holds {len}")]
    SubLayout {
        block: BlockId,
        covered: usize,
        len: usize,
    },

    #[error("{section}: {count} records of stride {stride} do not fill span of {span}")]
    Stride {
        section: &'static str,
        stride: usize,
        count: usize,
        span: usize,
    },

    #[error("{section} spans {len} positions but {category} has dimension {dim}")]
    CatalogSpan {
        section: &'static str,
        category: Category,
        len: usize,
        dim: usize,
    },

    #[error("ceiling `{name}` must be positive and finite, got {value}")]
    Ceiling { name: &'static str, value: f32 },
}

/// Check the shipped layout, sub-layouts and ceilings.
#[must_use]
pub fn validate() -> Vec<LayoutError> {
    let mut errors = validate_layout(&LAYOUT);
    errors.extend(validate_sub_layouts());
    errors.extend(validate_ceilings(&CEILINGS));
    errors
}

/// Panic with every problem [`validate`] finds.
///
/// # Panics
///
/// Panics if the layout is inconsistent.
pub fn self_check() {
    let errors = validate();
    if !errors.is_empty() {
        let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
        panic!("layout self-check failed:\n  {}", listed.join("\n  "));
    }
}

/// Check that a block table partitions `[0, dim)` in [`BlockId::ALL`] order.
#[must_use]
pub fn validate_layout(layout: &Layout) -> Vec<LayoutError> {
    let mut errors = Vec::new();
    let blocks = layout.blocks();

    for (index, (spec, expected)) in blocks.iter().zip(BlockId::ALL).enumerate() {
        if spec.id != expected {
            errors.push(LayoutError::OutOfOrder {
                index,
                expected,
                found: spec.id,
            });
        }
        if spec.reserved_tail > spec.len {
            errors.push(LayoutError::ReservedTooLarge {
                block: spec.id,
                reserved: spec.reserved_tail,
                len: spec.len,
            });
        }
    }

    if let Some(first) = blocks.first() {
        if first.offset != 0 {
            errors.push(LayoutError::FirstOffset {
                block: first.id,
                offset: first.offset,
            });
        }
    }

    for pair in blocks.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let prev_end = prev.span().end();
        if next.offset > prev_end {
            errors.push(LayoutError::Gap {
                prev: prev.id,
                next: next.id,
                prev_end,
                next_start: next.offset,
            });
        } else if next.offset < prev_end {
            errors.push(LayoutError::Overlap {
                prev: prev.id,
                next: next.id,
                prev_end,
                next_start: next.offset,
            });
        }
    }

    let sum: usize = blocks.iter().map(|b| b.len).sum();
    if sum != layout.dim() {
        errors.push(LayoutError::TotalMismatch {
            declared: layout.dim(),
            sum,
        });
    }

    errors
}

fn validate_sub_layouts() -> Vec<LayoutError> {
    let mut errors = Vec::new();

    let covered = [
        (BlockId::PlayerCore, PLAYER_CORE.end),
        (BlockId::Hand, HAND.end),
        (BlockId::DrawPile, DRAW_PILE.end),
        (BlockId::DiscardPile, DISCARD_PILE.end),
        (BlockId::ExhaustPile, EXHAUST_PILE.end),
        (BlockId::PlayerPowers, PLAYER_POWERS.end),
        (BlockId::Monsters, MONSTERS.end),
        (BlockId::Relics, RELICS.end),
        (BlockId::Potions, POTIONS.end),
        (BlockId::Global, GLOBAL.end),
    ];
    for (block, covered) in covered {
        let len = LAYOUT.block(block).len;
        if covered != len {
            errors.push(LayoutError::SubLayout {
                block,
                covered,
                len,
            });
        }
    }

    let strides = [
        ("hand.slots", CARD_SLOT.stride, HAND.slot_count, HAND.slots.len),
        (
            "monsters.slots",
            MONSTER_SLOT.stride,
            MONSTERS.slot_count,
            MONSTERS.slots.len,
        ),
        (
            "potions.slots",
            POTION_SLOT.stride,
            POTIONS.slot_count,
            POTIONS.slots.len,
        ),
        (
            "global.move_history",
            2,
            MONSTERS.slot_count,
            GLOBAL.dynamics.move_history.len,
        ),
        (
            "global.predicted",
            1,
            MONSTERS.slot_count,
            GLOBAL.dynamics.predicted.len,
        ),
        ("hand.stats", PILE_STATS.len, 1, HAND.stats.len),
        ("draw_pile.stats", PILE_STATS.len, 1, DRAW_PILE.stats.len),
        ("discard_pile.stats", PILE_STATS.len, 1, DISCARD_PILE.stats.len),
        ("exhaust_pile.stats", PILE_STATS.len, 1, EXHAUST_PILE.stats.len),
    ];
    for (section, stride, count, span) in strides {
        if stride * count != span {
            errors.push(LayoutError::Stride {
                section,
                stride,
                count,
                span,
            });
        }
    }

    let catalog_spans: [(&'static str, Span, Category); 13] = [
        ("hand.cards", HAND.cards, Category::Cards),
        ("draw_pile.cards", DRAW_PILE.cards, Category::Cards),
        ("discard_pile.cards", DISCARD_PILE.cards, Category::Cards),
        ("exhaust_pile.cards", EXHAUST_PILE.cards, Category::Cards),
        ("card_slot.card_type", CARD_SLOT.card_type, Category::CardTypes),
        ("card_slot.rarity", CARD_SLOT.rarity, Category::Rarities),
        ("player_powers.magnitudes", PLAYER_POWERS.magnitudes, Category::Powers),
        ("monster_slot.identity", MONSTER_SLOT.identity, Category::Monsters),
        ("monster_slot.intent", MONSTER_SLOT.intent, Category::Intents),
        ("relics.owned", RELICS.owned, Category::Relics),
        ("potions.owned", POTIONS.owned, Category::Potions),
        ("global.event", GLOBAL.event, Category::Events),
        ("global.room_subtype", GLOBAL.room_subtype, Category::RoomSubtypes),
    ];
    for (section, span, category) in catalog_spans {
        if span.len != category.dim() {
            errors.push(LayoutError::CatalogSpan {
                section,
                category,
                len: span.len,
                dim: category.dim(),
            });
        }
    }

    errors
}

/// Every ceiling must be a usable denominator.
#[must_use]
pub fn validate_ceilings(ceilings: &Ceilings) -> Vec<LayoutError> {
    ceilings
        .entries()
        .into_iter()
        .filter(|(_, value)| !(value.is_finite() && *value > 0.0))
        .map(|(name, value)| LayoutError::Ceiling { name, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::layout::{BlockSpec, LayoutBuilder, OUTPUT_DIM};

    #[test]
    fn test_shipped_layout_is_clean() {
        assert_eq!(validate(), Vec::new());
        self_check();
    }

    #[test]
    fn test_detects_total_mismatch() {
        let mut builder = LayoutBuilder::new();
        for id in BlockId::ALL {
            builder = builder.block(id, LAYOUT.block(id).len, 0);
        }
        let layout = builder.build(OUTPUT_DIM + 1);
        let errors = validate_layout(&layout);
        assert_eq!(
            errors,
            vec![LayoutError::TotalMismatch {
                declared: OUTPUT_DIM + 1,
                sum: OUTPUT_DIM,
            }]
        );
    }

    #[test]
    fn test_detects_gap_and_overlap() {
        let mut specs = *LAYOUT.blocks();
        specs[1] = BlockSpec {
            offset: specs[1].offset + 2,
            ..specs[1]
        };
        let errors = validate_layout(&Layout::from_specs(specs, OUTPUT_DIM));
        assert!(errors.iter().any(|e| matches!(
            e,
            LayoutError::Gap {
                prev: BlockId::PlayerCore,
                next: BlockId::Hand,
                ..
            }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            LayoutError::Overlap {
                prev: BlockId::Hand,
                next: BlockId::DrawPile,
                ..
            }
        )));
    }

    #[test]
    fn test_detects_first_offset_and_order() {
        let mut specs = *LAYOUT.blocks();
        specs.swap(7, 8);
        specs[0].offset = 1;
        let errors = validate_layout(&Layout::from_specs(specs, OUTPUT_DIM));
        assert!(errors
            .iter()
            .any(|e| matches!(e, LayoutError::FirstOffset { offset: 1, .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, LayoutError::OutOfOrder { index: 7, .. })));
    }

    #[test]
    fn test_detects_bad_ceiling() {
        let ceilings = Ceilings {
            damage: 0.0,
            gold: f32::NAN,
            ..CEILINGS
        };
        let names: Vec<_> = validate_ceilings(&ceilings)
            .into_iter()
            .map(|e| match e {
                LayoutError::Ceiling { name, .. } => name,
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(names, vec!["gold", "damage"]);
    }

    #[test]
    fn test_error_messages_name_blocks() {
        let err = LayoutError::SubLayout {
            block: BlockId::Global,
            covered: 501,
            len: 500,
        };
        assert_eq!(
            err.to_string(),
            "global sub-layout covers 501 positions, block holds 500"
        );
    }
}
