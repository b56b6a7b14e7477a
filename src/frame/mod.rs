//! Read-only access to raw game frames.
//!
//! A frame is a `serde_json::Value` straight from the mod protocol. Any key
//! may be missing at any depth; the views here give every field a typed
//! default so the encoders stay free of JSON plumbing.

mod node;
mod views;

pub use node::Node;
pub use views::{
    CardView, CombatView, FrameView, MapNodeView, MonsterView, PlayerView, PotionView, PowerView,
    RelicView, RewardView, ScreenView,
};
