//! Frame encoding for model input.
//!
//! Assembles the per-block encoders into one fixed-length vector.

use std::borrow::Cow;

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::{CatalogError, IdentifierRegistry};
use crate::encode::{
    encode_global, encode_hand, encode_monsters, encode_pile, encode_player_core,
    encode_player_powers, encode_potions, encode_relics,
};
use crate::frame::FrameView;
use crate::schema::blocks::{DISCARD_PILE, DRAW_PILE, EXHAUST_PILE};
use crate::schema::{self, CEILINGS, LAYOUT, OUTPUT_DIM, SCHEMA_VERSION};

use super::config::{CatalogSource, EncoderConfig};
use super::traits::FeatureVector;

/// Set once the layout self-check has passed in this process.
static LAYOUT_CHECKED: OnceCell<()> = OnceCell::new();

/// Run [`schema::self_check`] the first time any encoder is built.
fn check_layout_once() {
    LAYOUT_CHECKED.get_or_init(schema::self_check);
}

/// Encodes raw frames into feature vectors.
///
/// Implementations must be pure: the same frame always yields the same
/// vector, and encoding never fails.
pub trait StateEncoder: Send + Sync {
    /// Encode one raw frame.
    fn encode(&self, frame: &Value) -> FeatureVector;

    /// Encode many frames, preserving order.
    fn encode_batch(&self, frames: &[Value]) -> Vec<FeatureVector> {
        frames.iter().map(|f| self.encode(f)).collect()
    }

    /// Length of every vector this encoder produces.
    fn output_dim(&self) -> usize;
}

/// The vector assembler.
///
/// Owns (or borrows the process-wide) identifier registry and is otherwise
/// stateless, so one encoder can be shared across threads.
#[derive(Clone, Debug)]
pub struct FrameEncoder {
    registry: Cow<'static, IdentifierRegistry>,
}

impl FrameEncoder {
    /// Build an encoder from configuration.
    ///
    /// # Errors
    ///
    /// Returns the catalog error when a file or inline catalog cannot be
    /// read, parsed or indexed.
    ///
    /// # Panics
    ///
    /// Panics if `config.self_check` is set and the layout is inconsistent.
    pub fn new(config: &EncoderConfig) -> Result<Self, CatalogError> {
        let registry = match &config.catalog {
            CatalogSource::Builtin => Cow::Borrowed(IdentifierRegistry::builtin()),
            CatalogSource::Path(path) => Cow::Owned(IdentifierRegistry::from_path(path)?),
            CatalogSource::Inline(text) => Cow::Owned(IdentifierRegistry::from_toml_str(text)?),
        };
        if config.self_check {
            check_layout_once();
        }
        info!(
            schema_version = SCHEMA_VERSION,
            catalog_version = registry.version(),
            output_dim = OUTPUT_DIM,
            "frame encoder ready"
        );
        Ok(Self { registry })
    }

    /// Encoder over the built-in catalog. Runs the layout self-check on
    /// first use.
    pub fn builtin() -> Self {
        check_layout_once();
        Self {
            registry: Cow::Borrowed(IdentifierRegistry::builtin()),
        }
    }

    /// Encoder over an already-built registry. Runs the layout self-check
    /// on first use.
    pub fn with_registry(registry: IdentifierRegistry) -> Self {
        check_layout_once();
        Self {
            registry: Cow::Owned(registry),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    /// Encode a frame that is already wrapped in a view.
    #[must_use]
    pub fn encode_view(&self, frame: &FrameView<'_>) -> FeatureVector {
        let mut values = vec![0.0; OUTPUT_DIM];
        self.encode_into(frame, &mut values);
        FeatureVector::from_filled(values)
    }

    /// Encode into a caller-owned buffer, overwriting all of it.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != OUTPUT_DIM`.
    pub fn encode_into(&self, frame: &FrameView<'_>, out: &mut [f32]) {
        out.fill(0.0);
        let registry = self.registry();
        let blocks = LAYOUT.split_mut(out);

        encode_player_core(frame, blocks.player_core);
        encode_relics(registry, frame, blocks.relics);
        encode_potions(registry, frame, blocks.potions);
        encode_global(registry, frame, blocks.global);

        let Some(combat) = frame.combat() else {
            debug!("no combat state, combat blocks left zero");
            return;
        };
        encode_hand(registry, &combat, blocks.hand);
        encode_pile(
            registry,
            combat.draw_pile(),
            &DRAW_PILE,
            CEILINGS.draw,
            blocks.draw_pile,
        );
        encode_pile(
            registry,
            combat.discard_pile(),
            &DISCARD_PILE,
            CEILINGS.discard,
            blocks.discard_pile,
        );
        encode_pile(
            registry,
            combat.exhaust_pile(),
            &EXHAUST_PILE,
            CEILINGS.exhaust,
            blocks.exhaust_pile,
        );
        encode_player_powers(registry, &combat.player(), blocks.player_powers);
        encode_monsters(registry, &combat, blocks.monsters);
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StateEncoder for FrameEncoder {
    fn encode(&self, frame: &Value) -> FeatureVector {
        self.encode_view(&FrameView::new(frame))
    }

    fn encode_batch(&self, frames: &[Value]) -> Vec<FeatureVector> {
        frames.par_iter().map(|f| self.encode(f)).collect()
    }

    fn output_dim(&self) -> usize {
        OUTPUT_DIM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BlockId;
    use serde_json::json;

    fn combat_frame() -> Value {
        json!({
            "available_commands": ["play", "end", "potion"],
            "game_state": {
                "current_hp": 70, "max_hp": 80, "gold": 99, "floor": 3, "act": 1,
                "class": "IRONCLAD", "room_phase": "COMBAT", "room_type": "MonsterRoom",
                "relics": [{"id": "Burning Blood", "counter": -1}],
                "potions": [{"id": "Fire Potion", "can_use": true}],
                "combat_state": {
                    "player": {"current_hp": 70, "max_hp": 80, "block": 5, "energy": 3,
                               "powers": [{"id": "Strength", "amount": 2}]},
                    "hand": [{"id": "Strike_R", "cost": 1, "type": "ATTACK", "is_playable": true}],
                    "draw_pile": [{"id": "Defend_R", "cost": 1, "type": "SKILL"}],
                    "discard_pile": [{"id": "Bash", "cost": 2, "type": "ATTACK"}],
                    "exhaust_pile": [],
                    "monsters": [{"id": "JawWorm", "current_hp": 40, "max_hp": 44,
                                  "intent": "ATTACK", "move_adjusted_damage": 11, "move_hits": 1}],
                    "turn": 2
                }
            }
        })
    }

    #[test]
    fn test_output_dim() {
        let encoder = FrameEncoder::builtin();
        assert_eq!(encoder.output_dim(), OUTPUT_DIM);
        assert_eq!(encoder.encode(&combat_frame()).len(), OUTPUT_DIM);
        assert_eq!(encoder.encode(&json!(null)).len(), OUTPUT_DIM);
    }

    #[test]
    fn test_empty_frame_is_zero() {
        let vector = FrameEncoder::builtin().encode(&json!({}));
        assert!(vector.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_combat_blocks_filled() {
        let vector = FrameEncoder::builtin().encode(&combat_frame());
        for id in BlockId::ALL {
            let block = vector.block(id);
            if id == BlockId::ExhaustPile {
                continue;
            }
            assert!(block.iter().any(|&v| v > 0.0), "{id} should be populated");
        }
    }

    #[test]
    fn test_no_combat_leaves_combat_blocks_zero() {
        let mut frame = combat_frame();
        frame["game_state"]["combat_state"] = Value::Null;
        let vector = FrameEncoder::builtin().encode(&frame);

        for id in BlockId::ALL.into_iter().filter(|id| id.is_combat()) {
            assert!(vector.block(id).iter().all(|&v| v == 0.0), "{id}");
        }
        assert!(vector.block(BlockId::PlayerCore).iter().any(|&v| v > 0.0));
        assert!(vector.block(BlockId::Relics).iter().any(|&v| v > 0.0));
        assert!(vector.block(BlockId::Global).iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_encode_into_overwrites() {
        let encoder = FrameEncoder::builtin();
        let mut buffer = vec![0.9; OUTPUT_DIM];
        encoder.encode_into(&FrameView::new(&json!({})), &mut buffer);
        assert!(buffer.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_batch_matches_single() {
        let encoder = FrameEncoder::builtin();
        let frames = vec![combat_frame(), json!({}), combat_frame()];
        let batch = encoder.encode_batch(&frames);
        assert_eq!(batch.len(), 3);
        for (frame, vector) in frames.iter().zip(&batch) {
            assert_eq!(&encoder.encode(frame), vector);
        }
    }

    #[test]
    fn test_new_from_inline_catalog() {
        let mut catalog = String::from("version = 1\n");
        for category in crate::catalog::Category::ALL {
            catalog.push_str(&format!("{} = [\"unknown\", \"Thing\"]\n", category.key()));
        }
        let config = EncoderConfig::default().with_catalog_toml(catalog);
        let encoder = FrameEncoder::new(&config).unwrap();
        assert_eq!(encoder.registry().len(crate::catalog::Category::Relics), 2);

        let vector = encoder.encode(&json!({"relics": [{"id": "thing"}]}));
        assert_eq!(vector.block(BlockId::Relics)[1], 1.0);
    }

    #[test]
    fn test_new_rejects_bad_catalog() {
        let config = EncoderConfig::default().with_catalog_toml("version = 99");
        assert!(FrameEncoder::new(&config).is_err());
    }

    #[test]
    fn test_every_constructor_checks_layout() {
        let _ = FrameEncoder::builtin();
        assert!(LAYOUT_CHECKED.get().is_some());
        let _ = FrameEncoder::default();
        let _ = FrameEncoder::with_registry(IdentifierRegistry::builtin().clone());
        assert!(LAYOUT_CHECKED.get().is_some());
    }
}
