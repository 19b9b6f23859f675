//! Battle events handed to the presentation layer.

use serde::Serialize;

use crate::model::Role;

/// One resolved attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub attacker_name: &'static str,
    pub defender_name: &'static str,
    pub hit: bool,
    pub damage: i32,
    pub attack_name: &'static str,
    #[serde(rename = "defenderLifeCountRemaining")]
    pub defender_lives_remaining: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FightResult {
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FightEnd {
    pub result: FightResult,
    pub reward_issued: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum BattleEvent {
    BattleStarted {
        hero: &'static str,
        lives: u32,
        upgrades: Vec<&'static str>,
    },
    EnemyAppeared {
        name: &'static str,
        role: Role,
        lives: u32,
        boss: bool,
    },
    Attack(TurnOutcome),
    LifeLost {
        name: &'static str,
        lives_remaining: u32,
    },
    FightEnded(FightEnd),
    Escaped,
}

impl BattleEvent {
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"kind":"EncodeError","error":"{}"}}"#, e.to_string().replace('"', "'"))
        })
    }
}
