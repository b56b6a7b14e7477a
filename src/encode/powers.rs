//! Power parsing.
//!
//! The protocol reports buffs and debuffs only as a list of `{id, amount}`
//! records; stats such as strength are the sum of the amounts of every power
//! in the matching id family.

use crate::catalog::normalize;
use crate::frame::PowerView;

const STRENGTH: &[&str] = &[
    "strength",
    "anger",
    "flex",
    "ritual",
    "inflame",
    "spot_weakness",
    "limit_break",
    "demon_form",
];
const DEXTERITY: &[&str] = &["dexterity", "footwork"];
const WEAK: &[&str] = &["weakened", "weak"];
const VULNERABLE: &[&str] = &["vulnerable"];
const FRAIL: &[&str] = &["frail"];
const FOCUS: &[&str] = &["bias", "focus"];

/// Summed amounts per stat family.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PowerSummary {
    pub strength: f32,
    pub dexterity: f32,
    pub weak: f32,
    pub vulnerable: f32,
    pub frail: f32,
    pub focus: f32,
    /// Number of power records, known or not.
    pub active: usize,
}

impl PowerSummary {
    pub fn parse<'a>(powers: impl IntoIterator<Item = PowerView<'a>>) -> Self {
        let mut summary = Self::default();
        for power in powers {
            summary.active += 1;
            let key = normalize(power.id());
            let amount = power.amount();
            let family = [
                (STRENGTH, &mut summary.strength),
                (DEXTERITY, &mut summary.dexterity),
                (WEAK, &mut summary.weak),
                (VULNERABLE, &mut summary.vulnerable),
                (FRAIL, &mut summary.frail),
                (FOCUS, &mut summary.focus),
            ]
            .into_iter()
            .find(|(ids, _)| ids.contains(&key.as_str()));
            if let Some((_, total)) = family {
                *total += amount;
            }
        }
        summary
    }
}
