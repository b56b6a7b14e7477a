//! Monster type and room subtype classification.

use crate::catalog::normalize;
use crate::frame::{FrameView, MonsterView};

/// Canonical ids of act bosses.
const BOSS_IDS: &[&str] = &[
    "slimeboss",
    "theguardian",
    "hexaghost",
    "bronzeautomaton",
    "thecollector",
    "champ",
    "awakenedone",
    "timeeater",
    "donu",
    "deca",
    "corruptheart",
];

/// Canonical ids of elites.
const ELITE_IDS: &[&str] = &[
    "gremlinnob",
    "lagavulin",
    "sentry",
    "bookofstabbing",
    "gremlinleader",
    "slaverboss",
    "nemesis",
    "gianthead",
    "reptomancer",
    "spireshield",
    "spirespear",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Normal,
    Elite,
    Boss,
}

impl MonsterKind {
    /// Position in the three-way one-hot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            MonsterKind::Normal => 0,
            MonsterKind::Elite => 1,
            MonsterKind::Boss => 2,
        }
    }

    /// First decisive signal wins: explicit boss flag, explicit elite flag,
    /// `type` tag, known boss ids, known elite ids, id substring.
    #[must_use]
    pub fn of(monster: &MonsterView<'_>) -> Self {
        if monster.boss_flag() == Some(true) {
            return MonsterKind::Boss;
        }
        if monster.elite_flag() == Some(true) {
            return MonsterKind::Elite;
        }
        if let Some(tag) = monster.type_tag() {
            match normalize(tag).as_str() {
                "boss" => return MonsterKind::Boss,
                "elite" => return MonsterKind::Elite,
                _ => {}
            }
        }

        let key = normalize(monster.id());
        if BOSS_IDS.contains(&key.as_str()) {
            MonsterKind::Boss
        } else if ELITE_IDS.contains(&key.as_str()) {
            MonsterKind::Elite
        } else if key.contains("boss") {
            MonsterKind::Boss
        } else if key.contains("elite") {
            MonsterKind::Elite
        } else {
            MonsterKind::Normal
        }
    }
}

/// Room subtype name, resolved against the `room_subtypes` catalog.
///
/// In combat the monsters decide (any boss, else any elite, else a plain
/// fight). Outside combat the room type decides, then the screen type.
/// Both are matched in canonical form; room types also ignore separators,
/// so `"monsterroomboss"` and `"Monster Room Boss"` both read as a boss room.
#[must_use]
pub fn room_subtype(frame: &FrameView<'_>) -> &'static str {
    if let Some(combat) = frame.combat() {
        let strongest = combat
            .monsters()
            .map(|m| MonsterKind::of(&m))
            .max_by_key(|k| k.index())
            .unwrap_or(MonsterKind::Normal);
        return match strongest {
            MonsterKind::Boss => "BOSS",
            MonsterKind::Elite => "ELITE",
            MonsterKind::Normal => "MONSTER",
        };
    }

    let room = normalize(frame.room_type()).replace('_', "");
    let by_room = match room.as_str() {
        "monsterroomboss" => Some("BOSS"),
        "monsterroomelite" => Some("ELITE"),
        "monsterroom" => Some("MONSTER"),
        "eventroom" => Some("EVENT"),
        "shoproom" => Some("SHOP"),
        "restroom" => Some("REST"),
        "treasureroom" | "treasureroomboss" => Some("TREASURE"),
        "neowroom" => Some("NEOW"),
        _ => None,
    };
    if let Some(subtype) = by_room {
        return subtype;
    }

    match normalize(frame.screen_type()).as_str() {
        "event" => "EVENT",
        "shop_room" | "shop_screen" => "SHOP",
        "rest" => "REST",
        "chest" => "TREASURE",
        "map" => "MAP",
        "card_reward" => "CARD_REWARD",
        "combat_reward" => "COMBAT_REWARD",
        "boss_reward" => "BOSS_REWARD",
        "grid" => "GRID",
        "hand_select" => "HAND_SELECT",
        _ => "UNKNOWN",
    }
}
