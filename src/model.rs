//! Core data models for Spirit Arena.
//! Static catalog (heroes, boss, attack table) plus the per-fight character instances.

use serde::{Deserialize, Serialize};

/// Life-count a player starts a session with, before `extra_life` upgrades.
pub const PLAYER_LIVES: u32 = 3;
/// Life-count of every regular (non-boss) enemy.
pub const REGULAR_ENEMY_LIVES: u32 = 2;
/// Regular defeats required before the boss shows up.
pub const BOSS_THRESHOLD: u32 = 3;
pub const REGULAR_REWARD: u64 = 5;
pub const BOSS_REWARD: u64 = 15;
/// Accuracy ceiling for `accuracy_boost`.
pub const MAX_ACCURACY: u32 = 95;
pub const ACCURACY_BONUS: u32 = 15;
/// `damage_boost` multiplier expressed as a ratio (x1.2), floored.
pub const DAMAGE_BOOST_NUM: u32 = 6;
pub const DAMAGE_BOOST_DEN: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Assassin,
    Mage,
    Warrior,
    Boss,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Tank,
        Role::Assassin,
        Role::Mage,
        Role::Warrior,
        Role::Boss,
    ];

    fn slot(self) -> usize {
        match self {
            Role::Tank => 0,
            Role::Assassin => 1,
            Role::Mage => 2,
            Role::Warrior => 3,
            Role::Boss => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterTemplate {
    pub name: &'static str,
    pub role: Role,
    /// Base life; also the max life of every instance spawned from it.
    pub life: i32,
    /// Default life-count.
    pub lives: u32,
    pub image: &'static str,
}

pub static HEROES: [CharacterTemplate; 4] = [
    CharacterTemplate {
        name: "Tank",
        role: Role::Tank,
        life: 200,
        lives: PLAYER_LIVES,
        image: "./assets/tank.webp",
    },
    CharacterTemplate {
        name: "Assassin",
        role: Role::Assassin,
        life: 100,
        lives: PLAYER_LIVES,
        image: "./assets/assassin.webp",
    },
    CharacterTemplate {
        name: "Mage",
        role: Role::Mage,
        life: 90,
        lives: PLAYER_LIVES,
        image: "./assets/mage.webp",
    },
    CharacterTemplate {
        name: "Warrior",
        role: Role::Warrior,
        life: 120,
        lives: PLAYER_LIVES,
        image: "./assets/warrior.webp",
    },
];

pub static BOSS: CharacterTemplate = CharacterTemplate {
    name: "Devora",
    role: Role::Boss,
    life: 300,
    lives: 3,
    image: "./assets/boss.jpeg",
};

pub fn hero_by_name(name: &str) -> Option<&'static CharacterTemplate> {
    HEROES.iter().find(|h| h.name == name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AttackProfile {
    /// Hit chance in percent, 1..=100.
    pub probability: u32,
    pub damage: i32,
    pub name: &'static str,
}

/// One attack profile per role. Indexed by the closed `Role` enum, so a lookup never misses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackTable {
    profiles: [AttackProfile; 5],
}

impl AttackTable {
    /// The immutable design values. Every battle start derives its table from here.
    pub fn base() -> Self {
        Self {
            profiles: [
                AttackProfile { probability: 50, damage: 20, name: "Charge" },
                AttackProfile { probability: 65, damage: 29, name: "Blade Dance" },
                AttackProfile { probability: 70, damage: 30, name: "Fireball" },
                AttackProfile { probability: 90, damage: 100, name: "Cleaving Slash" },
                AttackProfile { probability: 70, damage: 60, name: "Massive Onslaught" },
            ],
        }
    }

    pub fn get(&self, role: Role) -> &AttackProfile {
        &self.profiles[role.slot()]
    }

    pub fn get_mut(&mut self, role: Role) -> &mut AttackProfile {
        &mut self.profiles[role.slot()]
    }
}

impl Default for AttackTable {
    fn default() -> Self {
        Self::base()
    }
}

/// A character taking part in a fight (player or enemy).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CharacterInstance {
    pub name: &'static str,
    pub role: Role,
    pub image: &'static str,
    /// Current life; may dip to or below zero until the life-count check runs.
    pub life: i32,
    pub max_life: i32,
    pub lives: u32,
}

impl CharacterInstance {
    pub fn spawn(template: &CharacterTemplate) -> Self {
        Self::with_lives(template, template.lives)
    }

    pub fn with_lives(template: &CharacterTemplate, lives: u32) -> Self {
        Self {
            name: template.name,
            role: template.role,
            image: template.image,
            life: template.life,
            max_life: template.life,
            lives,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    pub fn restore_life(&mut self) {
        self.life = self.max_life;
    }

    pub fn is_boss(&self) -> bool {
        self.role == Role::Boss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_profile() {
        let table = AttackTable::base();
        for role in Role::ALL {
            let p = table.get(role);
            assert!((1..=100).contains(&p.probability));
            assert!(p.damage > 0);
        }
        assert_eq!(table.get(Role::Warrior).damage, 100);
        assert_eq!(table.get(Role::Boss).name, "Massive Onslaught");
    }

    #[test]
    fn spawn_copies_template_life_into_max_life() {
        let mage = hero_by_name("Mage").unwrap();
        let inst = CharacterInstance::with_lives(mage, REGULAR_ENEMY_LIVES);
        assert_eq!(inst.life, 90);
        assert_eq!(inst.max_life, 90);
        assert_eq!(inst.lives, 2);
        assert!(!inst.is_boss());

        let boss = CharacterInstance::spawn(&BOSS);
        assert_eq!(boss.lives, 3);
        assert!(boss.is_boss());
    }

    #[test]
    fn unknown_hero_lookup_is_none() {
        assert!(hero_by_name("Devora").is_none());
        assert!(hero_by_name("Tank").is_some());
    }
}
