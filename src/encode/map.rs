//! Map summary inside the global block.

use crate::frame::FrameView;
use crate::schema::blocks::{MapLayout, MAP_SYMBOLS};
use crate::schema::CEILINGS;

use super::norm::{clamp_norm, named_index, one_hot};

fn symbol_index(symbol: &str) -> Option<usize> {
    named_index(&MAP_SYMBOLS, symbol)
}

/// Node count, per-symbol histogram, reachable symbols and the current
/// node. `out` is the whole global block.
pub fn encode_map(frame: &FrameView<'_>, layout: &MapLayout, out: &mut [f32]) {
    let c = &CEILINGS;

    let mut histogram = [0usize; MAP_SYMBOLS.len() + 1];
    let mut nodes = 0usize;
    for node in frame.map() {
        nodes += 1;
        let bucket = symbol_index(node.symbol()).unwrap_or(MAP_SYMBOLS.len());
        histogram[bucket] += 1;
    }
    layout
        .explored
        .set(out, clamp_norm(nodes as f32, c.map_nodes));
    let ceilings = c.symbol_ceilings();
    for (i, (count, slot)) in histogram
        .iter()
        .zip(layout.histogram.of_mut(out))
        .enumerate()
    {
        *slot = clamp_norm(*count as f32, ceilings[i]);
    }

    let screen = frame.screen();
    let reachable = layout.reachable.of_mut(out);
    let mut next = 0usize;
    for node in screen.next_nodes() {
        next += 1;
        if let Some(i) = symbol_index(node.symbol()) {
            one_hot(reachable, i);
        }
    }
    if screen.boss_available() {
        if let Some(i) = symbol_index("B") {
            one_hot(reachable, i);
        }
        next = next.max(1);
    }
    layout
        .reachable_count
        .set(out, clamp_norm(next as f32, c.reachable));

    if let Some(current) = screen.current_node() {
        layout
            .current_x
            .set(out, clamp_norm(current.x(), c.map_coordinate));
        layout
            .current_y
            .set(out, clamp_norm(current.y(), c.map_coordinate));
        if let Some(i) = symbol_index(current.symbol()) {
            one_hot(layout.current_symbol.of_mut(out), i);
        }
        layout
            .children
            .set(out, clamp_norm(current.children() as f32, c.adjacency));
        layout
            .parents
            .set(out, clamp_norm(current.parents() as f32, c.adjacency));
    }
}
