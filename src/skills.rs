//! Shop skill catalog.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    DamageBoost,
    ExtraLife,
    AccuracyBoost,
    /// Sold and stored, but has no battle effect yet.
    Regeneration,
}

impl SkillId {
    pub fn key(&self) -> &'static str {
        match self {
            SkillId::DamageBoost => "damage_boost",
            SkillId::ExtraLife => "extra_life",
            SkillId::AccuracyBoost => "accuracy_boost",
            SkillId::Regeneration => "regeneration",
        }
    }

    pub fn from_key(key: &str) -> Option<SkillId> {
        SKILL_DEFS.iter().map(|d| d.id).find(|id| id.key() == key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u64,
}

pub static SKILL_DEFS: [SkillDef; 4] = [
    SkillDef {
        id: SkillId::DamageBoost,
        name: "Sharpened Edge",
        description: "+20% attack damage",
        price: 30,
    },
    SkillDef {
        id: SkillId::ExtraLife,
        name: "Second Wind",
        description: "Start every battle with one extra life",
        price: 40,
    },
    SkillDef {
        id: SkillId::AccuracyBoost,
        name: "Eagle Eye",
        description: "+15% hit chance (max 95%)",
        price: 25,
    },
    SkillDef {
        id: SkillId::Regeneration,
        name: "Regeneration",
        description: "Slowly recover life during battle",
        price: 35,
    },
];

pub fn skill_def(id: SkillId) -> &'static SkillDef {
    match id {
        SkillId::DamageBoost => &SKILL_DEFS[0],
        SkillId::ExtraLife => &SKILL_DEFS[1],
        SkillId::AccuracyBoost => &SKILL_DEFS[2],
        SkillId::Regeneration => &SKILL_DEFS[3],
    }
}
