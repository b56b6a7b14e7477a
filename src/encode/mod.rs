//! Block encoders.
//!
//! One function per block family. Each writes into the slice it is handed,
//! which is exactly its block's span, and never fails: missing data leaves
//! zeros and unknown identifiers land on index 0.

pub mod classify;
mod global;
mod map;
mod monsters;
pub mod norm;
mod piles;
mod player;
mod player_powers;
pub mod powers;
mod potions;
mod relics;

pub use classify::{room_subtype, MonsterKind};
pub use global::encode_global;
pub use monsters::{encode_monsters, is_alive, predicted_damage};
pub use norm::{clamp_norm, multi_hot, one_hot};
pub use piles::{encode_hand, encode_pile, CardKind, CardMix};
pub use player::encode_player_core;
pub use player_powers::encode_player_powers;
pub use potions::encode_potions;
pub use powers::PowerSummary;
pub use relics::encode_relics;
