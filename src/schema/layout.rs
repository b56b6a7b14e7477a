//! Block table and offset arithmetic.
//!
//! Every offset in the output vector comes from here. Sub-layouts are built
//! with a [`Cursor`] that hands out consecutive [`Span`]s, and the block
//! table is built with a [`LayoutBuilder`] that does the same for whole
//! blocks, so no encoder ever adds offsets by hand.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::blocks::{
    DISCARD_PILE, DRAW_PILE, EXHAUST_PILE, GLOBAL, HAND, MONSTERS, PLAYER_CORE, PLAYER_POWERS,
    POTIONS, RELICS,
};

/// A half-open range of positions, relative to whatever buffer it indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub const EMPTY: Span = Span::new(0, 0);

    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last position.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The `index`-th stride-sized record inside this span.
    #[must_use]
    pub const fn slot(&self, stride: usize, index: usize) -> Span {
        Span::new(self.start + stride * index, stride)
    }

    #[must_use]
    pub fn of<'a>(&self, buf: &'a [f32]) -> &'a [f32] {
        &buf[self.range()]
    }

    pub fn of_mut<'a>(&self, buf: &'a mut [f32]) -> &'a mut [f32] {
        &mut buf[self.range()]
    }

    /// Write `value` at the span's first position.
    pub fn set(&self, buf: &mut [f32], value: f32) {
        buf[self.start] = value;
    }
}

/// Hands out consecutive spans from a running offset.
///
/// ```
/// use spire_encoder::schema::Cursor;
///
/// let c = Cursor::new();
/// let (cost, c) = c.take(1);
/// let (flags, c) = c.take(4);
/// assert_eq!(cost.start, 0);
/// assert_eq!(flags.start, 1);
/// assert_eq!(c.position(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    at: usize,
}

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { at: 0 }
    }

    /// Start handing out spans at `at`.
    #[must_use]
    pub const fn starting_at(at: usize) -> Self {
        Self { at }
    }

    /// Reserve `len` positions.
    #[must_use]
    pub const fn take(self, len: usize) -> (Span, Cursor) {
        (Span::new(self.at, len), Cursor { at: self.at + len })
    }

    /// Reserve `count` records of `stride` positions each.
    #[must_use]
    pub const fn repeat(self, stride: usize, count: usize) -> (Span, Cursor) {
        self.take(stride * count)
    }

    /// Reserve whatever is left up to `total`.
    #[must_use]
    pub const fn rest(self, total: usize) -> (Span, Cursor) {
        let len = total.saturating_sub(self.at);
        self.take(len)
    }

    #[must_use]
    pub const fn position(self) -> usize {
        self.at
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// The ten semantic blocks, in vector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockId {
    PlayerCore,
    Hand,
    DrawPile,
    DiscardPile,
    ExhaustPile,
    PlayerPowers,
    Monsters,
    Relics,
    Potions,
    Global,
}

impl BlockId {
    pub const COUNT: usize = 10;

    pub const ALL: [BlockId; Self::COUNT] = [
        BlockId::PlayerCore,
        BlockId::Hand,
        BlockId::DrawPile,
        BlockId::DiscardPile,
        BlockId::ExhaustPile,
        BlockId::PlayerPowers,
        BlockId::Monsters,
        BlockId::Relics,
        BlockId::Potions,
        BlockId::Global,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BlockId::PlayerCore => "player_core",
            BlockId::Hand => "hand",
            BlockId::DrawPile => "draw_pile",
            BlockId::DiscardPile => "discard_pile",
            BlockId::ExhaustPile => "exhaust_pile",
            BlockId::PlayerPowers => "player_powers",
            BlockId::Monsters => "monsters",
            BlockId::Relics => "relics",
            BlockId::Potions => "potions",
            BlockId::Global => "global",
        }
    }

    /// Blocks that stay zero when the frame has no combat sub-object.
    #[must_use]
    pub const fn is_combat(self) -> bool {
        matches!(
            self,
            BlockId::Hand
                | BlockId::DrawPile
                | BlockId::DiscardPile
                | BlockId::ExhaustPile
                | BlockId::PlayerPowers
                | BlockId::Monsters
        )
    }

    /// Parse a block name as printed by [`BlockId::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one block lives in the output vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub id: BlockId,
    pub offset: usize,
    pub len: usize,
    /// Trailing positions kept zero for forward-compatible additions.
    pub reserved_tail: usize,
}

impl BlockSpec {
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.len)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// Accumulates block offsets in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct LayoutBuilder {
    blocks: [BlockSpec; BlockId::COUNT],
    count: usize,
    offset: usize,
}

impl LayoutBuilder {
    #[must_use]
    pub const fn new() -> Self {
        const PLACEHOLDER: BlockSpec = BlockSpec {
            id: BlockId::PlayerCore,
            offset: 0,
            len: 0,
            reserved_tail: 0,
        };
        Self {
            blocks: [PLACEHOLDER; BlockId::COUNT],
            count: 0,
            offset: 0,
        }
    }

    /// Append the next block.
    #[must_use]
    pub const fn block(mut self, id: BlockId, len: usize, reserved_tail: usize) -> Self {
        assert!(self.count < BlockId::COUNT, "too many blocks");
        self.blocks[self.count] = BlockSpec {
            id,
            offset: self.offset,
            len,
            reserved_tail,
        };
        self.count += 1;
        self.offset += len;
        self
    }

    /// Finish the table. `declared_dim` is the advertised vector length,
    /// checked against the accumulated total by [`super::validate`].
    #[must_use]
    pub const fn build(self, declared_dim: usize) -> Layout {
        assert!(self.count == BlockId::COUNT, "every block must be declared");
        Layout {
            blocks: self.blocks,
            dim: declared_dim,
        }
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The block table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    blocks: [BlockSpec; BlockId::COUNT],
    dim: usize,
}

/// Length of every feature vector.
pub const OUTPUT_DIM: usize = 2945;

/// The authoritative block table.
pub const LAYOUT: Layout = LayoutBuilder::new()
    .block(BlockId::PlayerCore, PLAYER_CORE.len, 0)
    .block(BlockId::Hand, HAND.len, HAND.reserved.len)
    .block(BlockId::DrawPile, DRAW_PILE.len, DRAW_PILE.reserved.len)
    .block(BlockId::DiscardPile, DISCARD_PILE.len, DISCARD_PILE.reserved.len)
    .block(BlockId::ExhaustPile, EXHAUST_PILE.len, EXHAUST_PILE.reserved.len)
    .block(BlockId::PlayerPowers, PLAYER_POWERS.len, PLAYER_POWERS.reserved.len)
    .block(BlockId::Monsters, MONSTERS.len, MONSTERS.reserved.len)
    .block(BlockId::Relics, RELICS.len, RELICS.reserved.len)
    .block(BlockId::Potions, POTIONS.len, POTIONS.reserved.len)
    .block(BlockId::Global, GLOBAL.len, GLOBAL.reserved.len)
    .build(OUTPUT_DIM);

impl Layout {
    /// Build a table from explicit specs, for tooling that inspects other
    /// layouts. Nothing is checked until [`super::validate`] runs.
    #[must_use]
    pub const fn from_specs(blocks: [BlockSpec; BlockId::COUNT], dim: usize) -> Self {
        Self { blocks, dim }
    }

    /// Declared vector length.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub fn blocks(&self) -> &[BlockSpec; BlockId::COUNT] {
        &self.blocks
    }

    /// Spec for `id`.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &BlockSpec {
        &self.blocks[id as usize]
    }

    #[must_use]
    pub fn span(&self, id: BlockId) -> Span {
        self.block(id).span()
    }

    /// Cut `out` into one disjoint mutable slice per block.
    ///
    /// # Panics
    ///
    /// Panics if `out` is not exactly [`Layout::dim`] long.
    pub fn split_mut<'a>(&self, out: &'a mut [f32]) -> BlockSlices<'a> {
        assert_eq!(out.len(), self.dim, "output buffer length");
        let mut rest = out;
        let parts: [&'a mut [f32]; BlockId::COUNT] = std::array::from_fn(|i| {
            debug_assert_eq!(self.blocks[i].id as usize, i);
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(self.blocks[i].len);
            rest = tail;
            head
        });
        let [player_core, hand, draw_pile, discard_pile, exhaust_pile, player_powers, monsters, relics, potions, global] =
            parts;
        BlockSlices {
            player_core,
            hand,
            draw_pile,
            discard_pile,
            exhaust_pile,
            player_powers,
            monsters,
            relics,
            potions,
            global,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<14} {:>6} {:>6} {:>6} {:>9}", "block", "start", "end", "len", "reserved")?;
        for spec in &self.blocks {
            writeln!(
                f,
                "{:<14} {:>6} {:>6} {:>6} {:>9}{}",
                spec.name(),
                spec.offset,
                spec.span().end(),
                spec.len,
                spec.reserved_tail,
                if spec.id.is_combat() { "  (combat)" } else { "" }
            )?;
        }
        let used: usize = self.blocks.iter().map(|b| b.len).sum();
        let reserved: usize = self.blocks.iter().map(|b| b.reserved_tail).sum();
        write!(
            f,
            "total {used} (declared {}), {reserved} reserved",
            self.dim
        )
    }
}

/// One mutable slice per block, as produced by [`Layout::split_mut`].
#[derive(Debug)]
pub struct BlockSlices<'a> {
    pub player_core: &'a mut [f32],
    pub hand: &'a mut [f32],
    pub draw_pile: &'a mut [f32],
    pub discard_pile: &'a mut [f32],
    pub exhaust_pile: &'a mut [f32],
    pub player_powers: &'a mut [f32],
    pub monsters: &'a mut [f32],
    pub relics: &'a mut [f32],
    pub potions: &'a mut [f32],
    pub global: &'a mut [f32],
}
