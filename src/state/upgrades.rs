use std::collections::HashSet;

use crate::model::{
    ACCURACY_BONUS, AttackTable, CharacterTemplate, DAMAGE_BOOST_DEN, DAMAGE_BOOST_NUM,
    MAX_ACCURACY,
};
use crate::skills::SkillId;
use crate::state::profile::UpgradeAssignment;
use crate::util::{clog, cwarn};

/// What a hero brings into a battle after its shop upgrades.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loadout {
    pub attacks: AttackTable,
    pub bonus_lives: u32,
    pub applied: Vec<SkillId>,
}

/// Applies the hero's assigned skills on top of the base attack table.
///
/// Always starts from `AttackTable::base()`, so calling this at every battle start
/// yields the same values instead of compounding earlier boosts.
pub fn apply_assigned_upgrades(
    hero: &CharacterTemplate,
    assignments: &[UpgradeAssignment],
) -> Loadout {
    let mut loadout = Loadout {
        attacks: AttackTable::base(),
        bonus_lives: 0,
        applied: Vec::new(),
    };
    let mut seen = HashSet::new();

    for assignment in assignments.iter().filter(|a| a.hero == hero.name) {
        if !seen.insert(assignment.skill_id.as_str()) {
            continue;
        }
        let Some(skill) = SkillId::from_key(&assignment.skill_id) else {
            cwarn(&format!(
                "[upgrades] unknown skill {:?} on {}",
                assignment.skill_id, hero.name
            ));
            continue;
        };
        let profile = loadout.attacks.get_mut(hero.role);
        match skill {
            SkillId::DamageBoost => {
                profile.damage = profile.damage * DAMAGE_BOOST_NUM as i32 / DAMAGE_BOOST_DEN as i32;
            }
            SkillId::ExtraLife => loadout.bonus_lives += 1,
            SkillId::AccuracyBoost => {
                profile.probability = (profile.probability + ACCURACY_BONUS).min(MAX_ACCURACY);
            }
            SkillId::Regeneration => {
                // Owned but not wired into turn resolution.
                clog(&format!("[upgrades] regeneration on {} has no effect", hero.name));
            }
        }
        loadout.applied.push(skill);
    }

    loadout
}
