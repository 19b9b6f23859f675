//! Skill shop: buy a skill, then pick the hero that receives it.

use thiserror::Error;

use crate::model::{CharacterTemplate, HEROES, hero_by_name};
use crate::skills::{SkillId, skill_def};
use crate::state::profile::{Profile, UpgradeAssignment};
use crate::store::{KeyValueStore, StoreError};
use crate::util::clog;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("{skill_id} is already assigned to {}", .hero.as_deref().unwrap_or("every hero"))]
    AlreadyAssigned {
        skill_id: String,
        hero: Option<String>,
    },
    #[error("another purchase is waiting for a hero")]
    PurchasePending,
    #[error("no purchase is waiting for a hero")]
    NoPendingPurchase,
    #[error("unknown hero {0}")]
    UnknownHero(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingPurchase {
    pub skill_id: String,
    pub price: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shop {
    pending: Option<PendingPurchase>,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingPurchase> {
        self.pending.as_ref()
    }

    /// Reserves a skill for assignment. No coins move until a hero is chosen.
    pub fn purchase<S: KeyValueStore>(
        &mut self,
        profile: &Profile<S>,
        skill_id: &str,
        price: u64,
    ) -> Result<(), ShopError> {
        if self.pending.is_some() {
            return Err(ShopError::PurchasePending);
        }
        if profile.coins() < price {
            return Err(ShopError::InsufficientFunds {
                needed: price,
                available: profile.coins(),
            });
        }
        if profile.is_fully_acquired(skill_id) {
            return Err(ShopError::AlreadyAssigned {
                skill_id: skill_id.to_string(),
                hero: None,
            });
        }
        clog(&format!("[shop] {skill_id} reserved for {price} coins"));
        self.pending = Some(PendingPurchase {
            skill_id: skill_id.to_string(),
            price,
        });
        Ok(())
    }

    /// `purchase` at the catalog price.
    pub fn purchase_listed<S: KeyValueStore>(
        &mut self,
        profile: &Profile<S>,
        skill: SkillId,
    ) -> Result<(), ShopError> {
        self.purchase(profile, skill.key(), skill_def(skill).price)
    }

    /// Heroes that can still receive the pending skill.
    pub fn heroes_available<S: KeyValueStore>(
        &self,
        profile: &Profile<S>,
    ) -> Vec<&'static CharacterTemplate> {
        let Some(pending) = &self.pending else {
            return Vec::new();
        };
        HEROES
            .iter()
            .filter(|h| !profile.has_assignment(&pending.skill_id, h.name))
            .collect()
    }

    /// Pays for the pending skill and grants it to `hero`.
    pub fn assign_to_hero<S: KeyValueStore>(
        &mut self,
        profile: &mut Profile<S>,
        hero: &str,
    ) -> Result<UpgradeAssignment, ShopError> {
        let Some(pending) = self.pending.clone() else {
            return Err(ShopError::NoPendingPurchase);
        };
        let Some(template) = hero_by_name(hero) else {
            return Err(ShopError::UnknownHero(hero.to_string()));
        };
        if profile.has_assignment(&pending.skill_id, template.name) {
            return Err(ShopError::AlreadyAssigned {
                skill_id: pending.skill_id,
                hero: Some(template.name.to_string()),
            });
        }
        if profile.coins() < pending.price {
            self.pending = None;
            return Err(ShopError::InsufficientFunds {
                needed: pending.price,
                available: profile.coins(),
            });
        }

        let assignment = UpgradeAssignment::new(pending.skill_id, template.name);
        profile.commit_assignment(assignment.clone(), pending.price)?;
        self.pending = None;
        clog(&format!(
            "[shop] {} assigned to {} for {} coins",
            assignment.skill_id, assignment.hero, pending.price
        ));
        Ok(assignment)
    }

    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            clog(&format!("[shop] purchase of {} cancelled", p.skill_id));
        }
    }
}
