//! Scenario tests built from realistic protocol frames.
//!
//! Each frame mirrors what the game mod prints on a given screen; the
//! assertions read the vector back through the global and per-block layouts.

use serde_json::{json, Value};
use spire_encoder::catalog::{Category, IdentifierRegistry};
use spire_encoder::nn::{FeatureVector, FrameEncoder, StateEncoder};
use spire_encoder::schema::blocks::{
    CLASSES, GLOBAL, MAP_SYMBOLS, PLAYER_CORE, POTIONS, POTION_SLOT, REWARD_KINDS, SCREEN_TYPES,
};
use spire_encoder::schema::{BlockId, CEILINGS};

fn encode(frame: &Value) -> FeatureVector {
    FrameEncoder::builtin().encode(frame)
}

fn symbol(s: &str) -> usize {
    MAP_SYMBOLS.iter().position(|m| *m == s).expect("map symbol")
}

// =============================================================================
// Map Screen
// =============================================================================

fn map_frame() -> Value {
    json!({
        "available_commands": ["choose", "return"],
        "game_state": {
            "screen_type": "MAP", "room_phase": "COMPLETE", "floor": 4, "act": 1,
            "class": "THE_SILENT", "current_hp": 61, "max_hp": 70, "gold": 131,
            "map": [
                {"x": 0, "y": 0, "symbol": "M", "children": [{"x": 1, "y": 1}], "parents": []},
                {"x": 3, "y": 0, "symbol": "M", "children": [{"x": 2, "y": 1}], "parents": []},
                {"x": 2, "y": 1, "symbol": "$", "children": [{"x": 1, "y": 2}, {"x": 2, "y": 2}, {"x": 3, "y": 2}],
                 "parents": [{"x": 3, "y": 0}]},
                {"x": 1, "y": 2, "symbol": "?", "children": [], "parents": [{"x": 2, "y": 1}]},
                {"x": 2, "y": 2, "symbol": "E", "children": [], "parents": [{"x": 2, "y": 1}]},
                {"x": 3, "y": 2, "symbol": "R", "children": [], "parents": [{"x": 2, "y": 1}]}
            ],
            "screen_state": {
                "current_node": {"x": 2, "y": 1, "symbol": "$",
                                 "children": [{"x": 1, "y": 2}, {"x": 2, "y": 2}, {"x": 3, "y": 2}],
                                 "parents": [{"x": 3, "y": 0}]},
                "next_nodes": [
                    {"x": 1, "y": 2, "symbol": "?"},
                    {"x": 2, "y": 2, "symbol": "E"},
                    {"x": 3, "y": 2, "symbol": "R"}
                ],
                "boss_available": false,
                "first_node_chosen": true
            }
        }
    })
}

#[test]
fn test_map_histogram_and_reachable() {
    let vector = encode(&map_frame());
    let global = vector.block(BlockId::Global);
    let m = &GLOBAL.map;

    assert_eq!(global[m.explored.start], 6.0 / CEILINGS.map_nodes);
    let hist = m.histogram.of(global);
    assert_eq!(hist[symbol("M")], 2.0 / CEILINGS.symbol_monster);
    assert_eq!(hist[symbol("$")], 1.0 / CEILINGS.symbol_shop);
    assert_eq!(hist[symbol("?")], 1.0 / CEILINGS.symbol_event);
    assert_eq!(hist[symbol("E")], 1.0 / CEILINGS.symbol_elite);
    assert_eq!(hist[symbol("R")], 1.0 / CEILINGS.symbol_rest);
    assert_eq!(hist[symbol("B")], 0.0);

    let reachable = m.reachable.of(global);
    for s in ["?", "E", "R"] {
        assert_eq!(reachable[symbol(s)], 1.0, "{s}");
    }
    assert_eq!(reachable.iter().sum::<f32>(), 3.0);
    assert_eq!(global[m.reachable_count.start], 3.0 / CEILINGS.reachable);
}

#[test]
fn test_map_current_node() {
    let vector = encode(&map_frame());
    let global = vector.block(BlockId::Global);
    let m = &GLOBAL.map;

    assert_eq!(global[m.current_x.start], 2.0 / CEILINGS.map_coordinate);
    assert_eq!(global[m.current_y.start], 1.0 / CEILINGS.map_coordinate);
    assert_eq!(global[m.current_symbol.start + symbol("$")], 1.0);
    assert_eq!(m.current_symbol.of(global).iter().sum::<f32>(), 1.0);
    assert_eq!(global[m.children.start], 3.0 / CEILINGS.adjacency);
    assert_eq!(global[m.parents.start], 1.0 / CEILINGS.adjacency);
}

#[test]
fn test_map_screen_and_progress() {
    let vector = encode(&map_frame());
    let global = vector.block(BlockId::Global);

    let map_screen = SCREEN_TYPES.iter().position(|s| *s == "MAP").unwrap();
    assert_eq!(global[GLOBAL.screen.start + map_screen], 1.0);
    assert_eq!(global[GLOBAL.floor.start], 4.0 / CEILINGS.floor);
    assert_eq!(global[GLOBAL.in_combat.start], 0.0);

    let core = vector.block(BlockId::PlayerCore);
    assert_eq!(core[PLAYER_CORE.gold.start], 131.0 / CEILINGS.gold);
}

#[test]
fn test_mixed_spelling_matches_canonical() {
    let spelled = json!({"game_state": {
        "screen_type": "map", "room_type": "monsterroomboss", "class": "The Silent",
        "room_phase": "complete",
        "map": [{"symbol": "m"}, {"symbol": "M"}, {"symbol": " $ "}]
    }});
    let canonical = json!({"game_state": {
        "screen_type": "MAP", "room_type": "MonsterRoomBoss", "class": "THE_SILENT",
        "room_phase": "COMPLETE",
        "map": [{"symbol": "M"}, {"symbol": "M"}, {"symbol": "$"}]
    }});
    let vector = encode(&spelled);
    assert_eq!(vector, encode(&canonical));

    let global = vector.block(BlockId::Global);
    let silent = CLASSES.iter().position(|c| *c == "THE_SILENT").unwrap();
    assert_eq!(GLOBAL.class.of(global)[silent], 1.0);
    let map_screen = SCREEN_TYPES.iter().position(|s| *s == "MAP").unwrap();
    assert_eq!(global[GLOBAL.screen.start + map_screen], 1.0);

    let boss = IdentifierRegistry::builtin().index(Category::RoomSubtypes, "BOSS");
    assert_eq!(global[GLOBAL.room_subtype.start + boss], 1.0);

    let hist = GLOBAL.map.histogram.of(global);
    assert_eq!(hist[symbol("M")], 2.0 / CEILINGS.symbol_monster);
    assert_eq!(hist[symbol("$")], 1.0 / CEILINGS.symbol_shop);
    assert_eq!(hist[MAP_SYMBOLS.len()], 0.0);
}

// =============================================================================
// Screen Extras
// =============================================================================

#[test]
fn test_shop_purge_and_rewards() {
    let frame = json!({"game_state": {
        "screen_type": "COMBAT_REWARD", "room_type": "MonsterRoom", "room_phase": "COMPLETE",
        "screen_state": {
            "purge_available": true, "purge_cost": 100,
            "rewards": [{"type": "GOLD", "gold": 17}, {"type": "CARD"}, {"type": "RELIC", "relic": {"id": "Anchor"}}]
        }
    }});
    let vector = encode(&frame);
    let global = vector.block(BlockId::Global);
    let x = &GLOBAL.extras;

    assert_eq!(global[x.purge_available.start], 1.0);
    assert_eq!(global[x.purge_cost.start], 100.0 / CEILINGS.purge_cost);
    let rewards = x.rewards.of(global);
    for kind in ["GOLD", "CARD", "RELIC"] {
        let i = REWARD_KINDS.iter().position(|k| *k == kind).unwrap();
        assert_eq!(rewards[i], 1.0, "{kind}");
    }
    let potion = REWARD_KINDS.iter().position(|k| *k == "POTION").unwrap();
    assert_eq!(rewards[potion], 0.0);

    let registry = IdentifierRegistry::builtin();
    let monster_room = registry.index(Category::RoomSubtypes, "MONSTER");
    assert_eq!(global[GLOBAL.room_subtype.start + monster_room], 1.0);
}

#[test]
fn test_card_in_play() {
    let registry = IdentifierRegistry::builtin();
    let frame = json!({"game_state": {"combat_state": {
        "card_in_play": {"id": "Blade Dance", "upgrades": 0},
        "times_damaged": 3
    }}});
    let vector = encode(&frame);
    let global = vector.block(BlockId::Global);
    let x = &GLOBAL.extras;

    let index = registry.index(Category::Cards, "Blade Dance");
    let expected = index as f32 / (Category::Cards.dim() - 1) as f32;
    assert_eq!(global[x.card_in_play.start], expected);
    assert_eq!(global[x.card_in_play_upgraded.start], 0.0);
    assert_eq!(global[x.times_damaged.start], 3.0 / CEILINGS.times_damaged_global);
}

// =============================================================================
// Potions
// =============================================================================

#[test]
fn test_potion_belt_with_empty_slots() {
    let registry = IdentifierRegistry::builtin();
    let frame = json!({"game_state": {"potions": [
        {"id": "Potion Slot", "name": "Potion Slot", "can_use": false, "can_discard": false},
        {"id": "Swift Potion", "can_use": true, "can_discard": true, "requires_target": false},
        {"id": "Potion Slot", "name": "Potion Slot"},
        {"id": "FearPotion", "can_use": true, "can_discard": true, "requires_target": true}
    ]}});
    let vector = encode(&frame);
    let potions = vector.block(BlockId::Potions);

    assert_eq!(POTIONS.owned.of(potions).iter().sum::<f32>(), 2.0);
    for id in ["Swift Potion", "FearPotion"] {
        assert_eq!(potions[POTIONS.owned.start + registry.index(Category::Potions, id)], 1.0);
    }

    let slot = |i| POTIONS.slots.slot(POTION_SLOT.stride, i).of(potions);
    assert!(slot(0).iter().all(|&v| v == 0.0));
    assert!(slot(2).iter().all(|&v| v == 0.0));
    assert_eq!(slot(1)[POTION_SLOT.occupied.start], 1.0);
    assert_eq!(slot(1)[POTION_SLOT.requires_target.start], 0.0);
    assert_eq!(slot(3)[POTION_SLOT.requires_target.start], 1.0);

    assert_eq!(potions[POTIONS.filled.start], 2.0 / CEILINGS.potion_slots);
    assert_eq!(potions[POTIONS.usable.start], 2.0 / CEILINGS.potion_slots);
}

// =============================================================================
// Combat Frame
// =============================================================================

#[test]
fn test_boss_fight_frame() {
    let registry = IdentifierRegistry::builtin();
    let frame = json!({
        "available_commands": ["play", "end", "key", "click", "wait", "state"],
        "ready_for_command": true,
        "in_game": true,
        "game_state": {
            "screen_type": "NONE", "room_phase": "COMBAT", "room_type": "MonsterRoomBoss",
            "floor": 16, "act": 1, "ascension_level": 20, "class": "IRONCLAD",
            "current_hp": 52, "max_hp": 88, "gold": 212,
            "keys": {"ruby": false, "emerald": true, "sapphire": false},
            "relics": [{"id": "Burning Blood", "counter": -1}, {"id": "Pen Nib", "counter": 7}],
            "potions": [{"id": "Fire Potion", "can_use": true, "requires_target": true}],
            "combat_state": {
                "turn": 4, "cards_discarded_this_turn": 0, "times_damaged": 2,
                "player": {"current_hp": 52, "max_hp": 88, "block": 12, "energy": 2,
                           "powers": [{"id": "Strength", "amount": 3}, {"id": "Vulnerable", "amount": 1}]},
                "hand": [
                    {"id": "Bash", "cost": 2, "type": "ATTACK", "rarity": "BASIC", "is_playable": true, "has_target": true},
                    {"id": "Defend_R", "cost": 1, "type": "SKILL", "rarity": "BASIC", "is_playable": true}
                ],
                "draw_pile": [{"id": "Strike_R", "cost": 1, "type": "ATTACK"}],
                "discard_pile": [{"id": "Inflame", "cost": 1, "type": "POWER"}],
                "exhaust_pile": [{"id": "Wound", "cost": -2, "type": "STATUS"}],
                "monsters": [
                    {"id": "Hexaghost", "current_hp": 180, "max_hp": 250, "block": 0,
                     "intent": "ATTACK", "move_adjusted_damage": 6, "move_hits": 2,
                     "half_dead": false, "is_gone": false}
                ]
            }
        }
    });
    let vector = encode(&frame);
    let global = vector.block(BlockId::Global);

    let boss = registry.index(Category::RoomSubtypes, "BOSS");
    assert_eq!(global[GLOBAL.room_subtype.start + boss], 1.0);
    assert_eq!(global[GLOBAL.in_combat.start], 1.0);

    let commands = GLOBAL.commands.of(global);
    assert_eq!(commands.iter().sum::<f32>(), 2.0);

    let d = &GLOBAL.dynamics;
    assert_eq!(global[d.incoming_total.start], 12.0 / CEILINGS.damage);
    assert_eq!(global[d.incoming_unblocked.start], 0.0);

    let core = vector.block(BlockId::PlayerCore);
    assert_eq!(core[PLAYER_CORE.emerald_key.start], 1.0);
    assert_eq!(core[PLAYER_CORE.ruby_key.start], 0.0);
    assert_eq!(core[PLAYER_CORE.hand_count.start], 2.0 / CEILINGS.hand);

    for id in BlockId::ALL {
        assert!(vector.block(id).iter().any(|&v| v > 0.0), "{id}");
    }
}
