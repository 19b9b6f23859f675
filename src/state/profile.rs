//! Persisted progression: coin balance, purchase history and skill assignments.

use serde::{Deserialize, Serialize};

use crate::model::HEROES;
use crate::skills::SkillId;
use crate::store::{
    KEY_ASSIGNMENTS, KEY_COINS, KEY_PURCHASED, KeyValueStore, StoreError, load_json, load_u64,
    save_json,
};
use crate::util::{clog, cwarn};

/// A skill permanently granted to one hero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeAssignment {
    pub skill_id: String,
    pub hero: String,
}

impl UpgradeAssignment {
    pub fn new(skill_id: impl Into<String>, hero: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            hero: hero.into(),
        }
    }
}

/// Anything battle rewards can be paid into.
pub trait Wallet {
    fn deposit(&mut self, coins: u64);
}

impl Wallet for u64 {
    fn deposit(&mut self, coins: u64) {
        *self = self.saturating_add(coins);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillStatus {
    pub assigned_heroes: usize,
    pub fully_acquired: bool,
}

#[derive(Clone, Debug)]
pub struct Profile<S> {
    store: S,
    coins: u64,
    purchased: Vec<String>,
    assignments: Vec<UpgradeAssignment>,
}

impl<S: KeyValueStore> Profile<S> {
    pub fn load(store: S) -> Self {
        let coins = load_u64(&store, KEY_COINS);
        let purchased: Vec<String> = load_json(&store, KEY_PURCHASED);
        let assignments: Vec<UpgradeAssignment> = load_json(&store, KEY_ASSIGNMENTS);
        clog(&format!(
            "[profile] loaded coins={coins} purchased={} assignments={}",
            purchased.len(),
            assignments.len()
        ));
        Self {
            store,
            coins,
            purchased,
            assignments,
        }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn purchased(&self) -> &[String] {
        &self.purchased
    }

    pub fn assignments(&self) -> &[UpgradeAssignment] {
        &self.assignments
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_assignment(&self, skill_id: &str, hero: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.skill_id == skill_id && a.hero == hero)
    }

    /// Number of catalog heroes that own `skill_id`.
    pub fn assignment_count(&self, skill_id: &str) -> usize {
        HEROES
            .iter()
            .filter(|h| self.has_assignment(skill_id, h.name))
            .count()
    }

    pub fn is_fully_acquired(&self, skill_id: &str) -> bool {
        self.assignment_count(skill_id) >= HEROES.len()
    }

    pub fn skill_status(&self, skill: SkillId) -> SkillStatus {
        let assigned_heroes = self.assignment_count(skill.key());
        SkillStatus {
            assigned_heroes,
            fully_acquired: assigned_heroes >= HEROES.len(),
        }
    }

    pub fn skills_for_hero(&self, hero: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.hero == hero)
            .map(|a| a.skill_id.as_str())
            .collect()
    }

    /// Deducts `price` and appends `assignment`; both land in the store or neither does.
    /// Coins are written first, so a failed rollback can lose a skill but never grant one free.
    pub(crate) fn commit_assignment(
        &mut self,
        assignment: UpgradeAssignment,
        price: u64,
    ) -> Result<(), StoreError> {
        let mut assignments = self.assignments.clone();
        assignments.push(assignment.clone());
        let mut purchased = self.purchased.clone();
        if !purchased.contains(&assignment.skill_id) {
            purchased.push(assignment.skill_id.clone());
        }
        let coins = self.coins.saturating_sub(price);

        self.store.set_item(KEY_COINS, &coins.to_string())?;
        if let Err(e) = save_json(&mut self.store, KEY_ASSIGNMENTS, &assignments) {
            self.rollback(false);
            return Err(e);
        }
        if let Err(e) = save_json(&mut self.store, KEY_PURCHASED, &purchased) {
            self.rollback(true);
            return Err(e);
        }

        self.assignments = assignments;
        self.purchased = purchased;
        self.coins = coins;
        Ok(())
    }

    /// Restores the stored values from the in-memory state, assignments before coins.
    fn rollback(&mut self, assignments_written: bool) {
        let restored = if assignments_written {
            save_json(&mut self.store, KEY_ASSIGNMENTS, &self.assignments)
        } else {
            Ok(())
        };
        let restored =
            restored.and_then(|()| self.store.set_item(KEY_COINS, &self.coins.to_string()));
        if let Err(e) = restored {
            cwarn(&format!("[profile] rollback after failed write did not complete: {e}"));
        }
    }

    /// Wipes all persisted progress.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.remove_item(KEY_COINS)?;
        self.store.remove_item(KEY_PURCHASED)?;
        self.store.remove_item(KEY_ASSIGNMENTS)?;
        self.coins = 0;
        self.purchased.clear();
        self.assignments.clear();
        clog("[profile] progress reset");
        Ok(())
    }
}

impl<S: KeyValueStore> Wallet for Profile<S> {
    fn deposit(&mut self, coins: u64) {
        self.coins = self.coins.saturating_add(coins);
        if let Err(e) = self.store.set_item(KEY_COINS, &self.coins.to_string()) {
            cwarn(&format!("[profile] could not persist coins: {e}"));
        }
    }
}
