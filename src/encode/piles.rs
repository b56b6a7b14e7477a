//! Hand, draw, discard and exhaust blocks.

use crate::catalog::{normalize, Category, IdentifierRegistry, UNKNOWN_INDEX};
use crate::frame::{CardView, CombatView};
use crate::schema::blocks::{PileLayout, CARD_SLOT, HAND, PILE_STATS};
use crate::schema::CEILINGS;

use super::norm::{clamp_norm, flag, multi_hot, one_hot, ratio, saturate};

/// Coarse card type used by the composition statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    Attack,
    Skill,
    Power,
    Status,
    Curse,
    Other,
}

impl CardKind {
    #[must_use]
    pub fn of(card: &CardView<'_>) -> Self {
        match normalize(card.card_type()).as_str() {
            "attack" => CardKind::Attack,
            "skill" => CardKind::Skill,
            "power" => CardKind::Power,
            "status" => CardKind::Status,
            "curse" => CardKind::Curse,
            _ => CardKind::Other,
        }
    }

    /// Position in [`crate::schema::blocks::COMPOSITION_TYPES`].
    #[must_use]
    pub const fn composition_index(self) -> Option<usize> {
        match self {
            CardKind::Attack => Some(0),
            CardKind::Skill => Some(1),
            CardKind::Power => Some(2),
            CardKind::Status => Some(3),
            CardKind::Curse => Some(4),
            CardKind::Other => None,
        }
    }
}

/// Raw counts over one pile of cards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardMix {
    pub size: usize,
    /// Per [`CardKind::composition_index`].
    pub kinds: [usize; 5],
    pub zero_cost: usize,
    pub upgraded: usize,
    pub ethereal: usize,
    pub exhausts: usize,
    /// Cards with a non-negative cost.
    pub costed: usize,
    pub total_cost: f32,
}

impl CardMix {
    pub fn tally<'a>(cards: impl IntoIterator<Item = CardView<'a>>) -> Self {
        let mut mix = Self::default();
        for card in cards {
            mix.size += 1;
            if let Some(i) = CardKind::of(&card).composition_index() {
                mix.kinds[i] += 1;
            }
            let cost = card.cost();
            if cost == 0 {
                mix.zero_cost += 1;
            }
            if cost >= 0 {
                mix.costed += 1;
                mix.total_cost += cost as f32;
            }
            if card.upgrades() > 0 {
                mix.upgraded += 1;
            }
            if card.ethereal() {
                mix.ethereal += 1;
            }
            if card.exhausts() {
                mix.exhausts += 1;
            }
        }
        mix
    }

    #[must_use]
    pub fn kind(&self, kind: CardKind) -> usize {
        kind.composition_index().map_or(0, |i| self.kinds[i])
    }

    /// Mean cost of costed cards, 0 for none.
    #[must_use]
    pub fn avg_cost(&self) -> f32 {
        if self.costed == 0 {
            0.0
        } else {
            self.total_cost / self.costed as f32
        }
    }

    /// Write the pile statistics record. `out` is the stats span.
    pub fn write_stats(&self, out: &mut [f32], size_ceiling: f32, total_cost_ceiling: f32) {
        let s = &PILE_STATS;
        let count = |n: usize| clamp_norm(n as f32, size_ceiling);
        let status_curse = self.kind(CardKind::Status) + self.kind(CardKind::Curse);

        s.size.set(out, count(self.size));
        s.zero_cost.set(out, count(self.zero_cost));
        s.zero_cost_ratio.set(out, ratio(self.zero_cost, self.size));
        s.attack.set(out, count(self.kind(CardKind::Attack)));
        s.attack_ratio
            .set(out, ratio(self.kind(CardKind::Attack), self.size));
        s.skill.set(out, count(self.kind(CardKind::Skill)));
        s.skill_ratio
            .set(out, ratio(self.kind(CardKind::Skill), self.size));
        s.power.set(out, count(self.kind(CardKind::Power)));
        s.power_ratio
            .set(out, ratio(self.kind(CardKind::Power), self.size));
        s.status_curse.set(out, count(status_curse));
        s.status_curse_ratio.set(out, ratio(status_curse, self.size));
        s.upgraded.set(out, count(self.upgraded));
        s.upgraded_ratio.set(out, ratio(self.upgraded, self.size));
        s.ethereal.set(out, count(self.ethereal));
        s.exhausts.set(out, count(self.exhausts));
        s.avg_cost
            .set(out, clamp_norm(self.avg_cost(), CEILINGS.card_cost));
        s.total_cost
            .set(out, clamp_norm(self.total_cost, total_cost_ceiling));
    }
}

/// Card multi-hot over the catalog, folded into `[0, 1]`.
fn write_card_counts<'a>(
    registry: &IdentifierRegistry,
    cards: impl IntoIterator<Item = CardView<'a>>,
    out: &mut [f32],
) {
    for card in cards {
        multi_hot(out, registry.index(Category::Cards, card.id()));
    }
    saturate(out, CEILINGS.multi_hot);
}

/// One hand slot. `out` is the slot's span.
fn write_card_slot(registry: &IdentifierRegistry, card: &CardView<'_>, out: &mut [f32]) {
    let s = &CARD_SLOT;
    let cost = card.cost();
    if cost == -1 {
        s.x_cost.set(out, 1.0);
    } else if cost > 0 {
        s.cost.set(out, clamp_norm(cost as f32, CEILINGS.card_cost));
    }
    s.playable.set(out, flag(card.is_playable()));
    s.has_target.set(out, flag(card.has_target()));
    s.ethereal.set(out, flag(card.ethereal()));
    s.exhausts.set(out, flag(card.exhausts()));
    s.upgraded.set(out, flag(card.upgrades() > 0));
    s.upgrades
        .set(out, clamp_norm(card.upgrades() as f32, CEILINGS.upgrades));

    let card_type = registry.index(Category::CardTypes, card.card_type());
    one_hot(s.card_type.of_mut(out), card_type);

    let mut rarity = registry.index(Category::Rarities, card.rarity());
    if rarity == UNKNOWN_INDEX {
        rarity = registry.index(Category::Rarities, "COMMON");
    }
    one_hot(s.rarity.of_mut(out), rarity);
}

/// Hand block: multi-hot, per-slot detail for the first ten cards, stats.
pub fn encode_hand(registry: &IdentifierRegistry, combat: &CombatView<'_>, out: &mut [f32]) {
    write_card_counts(registry, combat.hand(), HAND.cards.of_mut(out));

    // cards past the last slot only show up in the counts and stats
    let slots = HAND.slots.of_mut(out).chunks_exact_mut(CARD_SLOT.stride);
    for (card, slot) in combat.hand().zip(slots) {
        write_card_slot(registry, &card, slot);
    }

    CardMix::tally(combat.hand()).write_stats(
        HAND.stats.of_mut(out),
        CEILINGS.hand,
        CEILINGS.total_cost,
    );
}

/// Draw, discard or exhaust block.
pub fn encode_pile<'a>(
    registry: &IdentifierRegistry,
    cards: impl IntoIterator<Item = CardView<'a>> + Clone,
    layout: &PileLayout,
    size_ceiling: f32,
    out: &mut [f32],
) {
    write_card_counts(registry, cards.clone(), layout.cards.of_mut(out));
    CardMix::tally(cards).write_stats(
        layout.stats.of_mut(out),
        size_ceiling,
        CEILINGS.pile_total_cost,
    );
}
