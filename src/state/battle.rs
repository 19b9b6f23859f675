//! Battle session and turn resolution.

use thiserror::Error;

use crate::dice::Dice;
use crate::model::{
    AttackProfile, AttackTable, BOSS_REWARD, CharacterInstance, CharacterTemplate, REGULAR_REWARD,
};
use crate::state::events::{BattleEvent, FightEnd, FightResult, TurnOutcome};
use crate::state::profile::{UpgradeAssignment, Wallet};
use crate::state::spawner::spawn_next;
use crate::state::upgrades::apply_assigned_upgrades;
use crate::util::clog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Ongoing,
    Defeated,
    Escaped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("it is the {expected:?} side's turn")]
    OutOfTurn { expected: Turn },
    #[error("the battle is over")]
    SessionOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackResolution {
    pub hit: bool,
    pub damage_applied: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeCheck {
    Standing,
    LifeLost { remaining: u32 },
    Eliminated,
}

/// Rolls one attack. A hit always deals the profile's full damage.
pub fn resolve_attack(
    defender: &mut CharacterInstance,
    profile: &AttackProfile,
    dice: &mut dyn Dice,
) -> AttackResolution {
    let hit = dice.percent() <= profile.probability;
    if !hit {
        return AttackResolution {
            hit: false,
            damage_applied: 0,
        };
    }
    defender.life -= profile.damage;
    AttackResolution {
        hit: true,
        damage_applied: profile.damage,
    }
}

/// Converts depleted life into a lost life-count, restoring life if any remain.
pub fn check_lives(defender: &mut CharacterInstance) -> LifeCheck {
    if defender.life > 0 || defender.lives == 0 {
        return LifeCheck::Standing;
    }
    defender.lives -= 1;
    if defender.lives > 0 {
        defender.restore_life();
        LifeCheck::LifeLost {
            remaining: defender.lives,
        }
    } else {
        LifeCheck::Eliminated
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleSession {
    pub hero: CharacterTemplate,
    pub player: CharacterInstance,
    pub enemy: CharacterInstance,
    pub attacks: AttackTable,
    /// Enemies beaten since the last boss cycle started.
    pub defeated: u32,
    pub boss_active: bool,
    turn: Turn,
    status: SessionStatus,
}

impl BattleSession {
    /// Starts a fight for `hero` with its shop upgrades applied.
    pub fn start(
        hero: &CharacterTemplate,
        assignments: &[UpgradeAssignment],
        dice: &mut dyn Dice,
    ) -> (Self, Vec<BattleEvent>) {
        let loadout = apply_assigned_upgrades(hero, assignments);
        let player = CharacterInstance::with_lives(hero, hero.lives + loadout.bonus_lives);
        let spawn = spawn_next(hero, 0, false, dice);

        let mut events = vec![BattleEvent::BattleStarted {
            hero: hero.name,
            lives: player.lives,
            upgrades: loadout.applied.iter().map(|s| s.key()).collect(),
        }];
        events.push(enemy_appeared(&spawn.enemy));
        clog(&format!(
            "[battle:start] {} ({} lives) vs {}",
            hero.name, player.lives, spawn.enemy.name
        ));

        let session = Self {
            hero: *hero,
            player,
            enemy: spawn.enemy,
            attacks: loadout.attacks,
            defeated: spawn.defeated,
            boss_active: spawn.boss_active,
            turn: Turn::Player,
            status: SessionStatus::Ongoing,
        };
        (session, events)
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::Ongoing
    }

    fn ensure_turn(&self, expected: Turn) -> Result<(), TurnError> {
        if self.is_over() {
            return Err(TurnError::SessionOver);
        }
        if self.turn != expected {
            return Err(TurnError::OutOfTurn {
                expected: self.turn,
            });
        }
        Ok(())
    }

    /// The player's attack. Rewards for a beaten enemy go into `wallet`.
    pub fn player_turn(
        &mut self,
        dice: &mut dyn Dice,
        wallet: &mut dyn Wallet,
    ) -> Result<Vec<BattleEvent>, TurnError> {
        self.ensure_turn(Turn::Player)?;
        let profile = *self.attacks.get(self.player.role);
        let resolution = resolve_attack(&mut self.enemy, &profile, dice);
        let check = check_lives(&mut self.enemy);

        let mut events = vec![BattleEvent::Attack(outcome(
            &self.player,
            &self.enemy,
            &profile,
            resolution,
        ))];

        match check {
            LifeCheck::Standing => self.turn = Turn::Enemy,
            LifeCheck::LifeLost { remaining } => {
                events.push(BattleEvent::LifeLost {
                    name: self.enemy.name,
                    lives_remaining: remaining,
                });
                self.turn = Turn::Enemy;
            }
            LifeCheck::Eliminated => {
                let reward = if self.enemy.is_boss() {
                    BOSS_REWARD
                } else {
                    REGULAR_REWARD
                };
                wallet.deposit(reward);
                self.player.lives += 1;
                self.player.restore_life();
                self.defeated += 1;
                clog(&format!(
                    "[battle:win] {} beaten, +{reward} coins, defeated={}",
                    self.enemy.name, self.defeated
                ));
                events.push(BattleEvent::FightEnded(FightEnd {
                    result: FightResult::Victory,
                    reward_issued: reward,
                }));

                let spawn = spawn_next(&self.hero, self.defeated, self.boss_active, dice);
                self.enemy = spawn.enemy;
                self.defeated = spawn.defeated;
                self.boss_active = spawn.boss_active;
                events.push(enemy_appeared(&self.enemy));
                self.turn = Turn::Player;
            }
        }
        Ok(events)
    }

    /// The enemy's automatic response. Only valid right after a player turn.
    pub fn enemy_turn(&mut self, dice: &mut dyn Dice) -> Result<Vec<BattleEvent>, TurnError> {
        self.ensure_turn(Turn::Enemy)?;
        let profile = *self.attacks.get(self.enemy.role);
        let resolution = resolve_attack(&mut self.player, &profile, dice);
        let check = check_lives(&mut self.player);

        let mut events = vec![BattleEvent::Attack(outcome(
            &self.enemy,
            &self.player,
            &profile,
            resolution,
        ))];

        match check {
            LifeCheck::Standing => {}
            LifeCheck::LifeLost { remaining } => events.push(BattleEvent::LifeLost {
                name: self.player.name,
                lives_remaining: remaining,
            }),
            LifeCheck::Eliminated => {
                self.status = SessionStatus::Defeated;
                clog(&format!("[battle:end] {} falls to {}", self.player.name, self.enemy.name));
                events.push(BattleEvent::FightEnded(FightEnd {
                    result: FightResult::Defeat,
                    reward_issued: 0,
                }));
                return Ok(events);
            }
        }
        self.turn = Turn::Player;
        Ok(events)
    }

    pub fn escape(&mut self) -> Result<BattleEvent, TurnError> {
        if self.is_over() {
            return Err(TurnError::SessionOver);
        }
        self.status = SessionStatus::Escaped;
        clog(&format!("[battle:end] {} escaped", self.player.name));
        Ok(BattleEvent::Escaped)
    }
}

fn outcome(
    attacker: &CharacterInstance,
    defender: &CharacterInstance,
    profile: &AttackProfile,
    resolution: AttackResolution,
) -> TurnOutcome {
    TurnOutcome {
        attacker_name: attacker.name,
        defender_name: defender.name,
        hit: resolution.hit,
        damage: resolution.damage_applied,
        attack_name: profile.name,
        defender_lives_remaining: defender.lives,
    }
}

fn enemy_appeared(enemy: &CharacterInstance) -> BattleEvent {
    BattleEvent::EnemyAppeared {
        name: enemy.name,
        role: enemy.role,
        lives: enemy.lives,
        boss: enemy.is_boss(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::SeededDice;
    use crate::dice::testing::ScriptedDice;
    use crate::model::{BOSS, HEROES, Role, hero_by_name};

    fn profile(probability: u32, damage: i32) -> AttackProfile {
        AttackProfile {
            probability,
            damage,
            name: "Test Strike",
        }
    }

    #[test]
    fn hit_applies_exact_damage_and_miss_applies_none() {
        let mut dummy = CharacterInstance::spawn(hero_by_name("Tank").unwrap());
        let mut dice = SeededDice::new(3);
        let p = profile(60, 17);
        for _ in 0..200 {
            let before = dummy.life;
            let r = resolve_attack(&mut dummy, &p, &mut dice);
            if r.damage_applied > 0 {
                assert!(r.hit);
            }
            if r.hit {
                assert_eq!(r.damage_applied, 17);
                assert_eq!(dummy.life, before - 17);
            } else {
                assert_eq!(r.damage_applied, 0);
                assert_eq!(dummy.life, before);
            }
        }
    }

    #[test]
    fn roll_equal_to_probability_hits() {
        let mut dummy = CharacterInstance::spawn(&BOSS);
        let mut dice = ScriptedDice::always_miss().with_percents(&[60, 61]);
        assert!(resolve_attack(&mut dummy, &profile(60, 1), &mut dice).hit);
        assert!(!resolve_attack(&mut dummy, &profile(60, 1), &mut dice).hit);
    }

    #[test]
    fn life_check_restores_then_eliminates() {
        let mut mage = CharacterInstance::with_lives(hero_by_name("Mage").unwrap(), 2);
        mage.life = 0;
        assert_eq!(check_lives(&mut mage), LifeCheck::LifeLost { remaining: 1 });
        assert_eq!(mage.life, 90);

        mage.life = -40;
        assert_eq!(check_lives(&mut mage), LifeCheck::Eliminated);
        assert_eq!(mage.lives, 0);
        assert!(mage.is_defeated());

        // Never underflows.
        assert_eq!(check_lives(&mut mage), LifeCheck::Standing);
        assert_eq!(mage.lives, 0);
    }

    #[test]
    fn turns_strictly_alternate() {
        let hero = hero_by_name("Tank").unwrap();
        let mut dice = ScriptedDice::always_miss();
        let mut coins = 0_u64;
        let (mut session, _) = BattleSession::start(hero, &[], &mut dice);

        assert_eq!(
            session.enemy_turn(&mut dice),
            Err(TurnError::OutOfTurn {
                expected: Turn::Player
            })
        );
        session.player_turn(&mut dice, &mut coins).unwrap();
        assert_eq!(session.turn(), Turn::Enemy);

        let before = session.clone();
        assert_eq!(
            session.player_turn(&mut dice, &mut coins),
            Err(TurnError::OutOfTurn {
                expected: Turn::Enemy
            })
        );
        assert_eq!(session, before);

        session.enemy_turn(&mut dice).unwrap();
        assert_eq!(session.turn(), Turn::Player);
    }

    #[test]
    fn beating_an_enemy_pays_and_heals() {
        let warrior = hero_by_name("Warrior").unwrap();
        let mut dice = ScriptedDice::always_hit();
        let mut coins = 0_u64;
        let (mut session, _) = BattleSession::start(warrior, &[], &mut dice);
        session.player.life = 7;

        let mut turns = 0;
        let events = loop {
            turns += 1;
            let events = session.player_turn(&mut dice, &mut coins).unwrap();
            if events
                .iter()
                .any(|e| matches!(e, BattleEvent::FightEnded(_)))
            {
                break events;
            }
            session.enemy_turn(&mut ScriptedDice::always_miss()).unwrap();
        };

        assert!(turns <= 4);
        assert_eq!(coins, 5);
        assert_eq!(session.player.lives, 4);
        assert_eq!(session.player.life, session.player.max_life);
        assert_eq!(session.defeated, 1);
        assert_eq!(session.turn(), Turn::Player);
        assert_eq!(session.enemy.lives, 2);
        assert!(matches!(
            events.last(),
            Some(BattleEvent::EnemyAppeared { boss: false, .. })
        ));
    }

    #[test]
    fn warrior_clears_a_regular_enemy_within_bound() {
        for (i, enemy) in HEROES.iter().filter(|h| h.name != "Warrior").enumerate() {
            let warrior = hero_by_name("Warrior").unwrap();
            let mut dice = ScriptedDice::always_hit().with_indices(&[i]);
            let mut coins = 0_u64;
            let (mut session, _) = BattleSession::start(warrior, &[], &mut dice);
            assert_eq!(session.enemy.name, enemy.name);
            let max_life = session.enemy.max_life;
            let bound = 2 * ((max_life + 99) / 100);

            let mut turns = 0;
            while coins == 0 {
                turns += 1;
                session.player_turn(&mut dice, &mut coins).unwrap();
                if session.turn() == Turn::Enemy {
                    session.enemy_turn(&mut ScriptedDice::always_miss()).unwrap();
                }
            }
            assert!(turns <= bound, "{} took {turns} turns", enemy.name);
        }
    }

    #[test]
    fn player_defeat_ends_session() {
        let mage = hero_by_name("Mage").unwrap();
        let mut dice = ScriptedDice::always_hit();
        let mut coins = 0_u64;
        let (mut session, _) = BattleSession::start(mage, &[], &mut dice);
        session.player.lives = 1;
        session.player.life = 1;

        session.player_turn(&mut ScriptedDice::always_miss(), &mut coins).unwrap();
        let events = session.enemy_turn(&mut dice).unwrap();
        assert_eq!(session.status(), SessionStatus::Defeated);
        assert_eq!(session.player.lives, 0);
        assert_eq!(
            events.last(),
            Some(&BattleEvent::FightEnded(FightEnd {
                result: FightResult::Defeat,
                reward_issued: 0,
            }))
        );
        assert_eq!(
            session.player_turn(&mut dice, &mut coins),
            Err(TurnError::SessionOver)
        );
        assert_eq!(session.escape(), Err(TurnError::SessionOver));
        assert_eq!(coins, 0);
    }

    #[test]
    fn extra_life_upgrade_adds_a_life_count() {
        let tank = hero_by_name("Tank").unwrap();
        let assignments = [UpgradeAssignment::new("extra_life", "Tank")];
        let (session, events) =
            BattleSession::start(tank, &assignments, &mut SeededDice::new(5));
        assert_eq!(session.player.lives, 4);
        assert_eq!(
            events.first(),
            Some(&BattleEvent::BattleStarted {
                hero: "Tank",
                lives: 4,
                upgrades: vec!["extra_life"],
            })
        );
    }

    #[test]
    fn escape_tears_down_the_session() {
        let assassin = hero_by_name("Assassin").unwrap();
        let mut dice = SeededDice::new(11);
        let (mut session, _) = BattleSession::start(assassin, &[], &mut dice);
        assert_eq!(session.escape(), Ok(BattleEvent::Escaped));
        assert_eq!(session.status(), SessionStatus::Escaped);
        assert_eq!(session.enemy_turn(&mut dice), Err(TurnError::SessionOver));
    }

    #[test]
    fn boss_kill_pays_fifteen() {
        let warrior = hero_by_name("Warrior").unwrap();
        let mut dice = ScriptedDice::always_hit();
        let mut coins = 0_u64;
        let (mut session, _) = BattleSession::start(warrior, &[], &mut dice);
        session.enemy = CharacterInstance::spawn(&BOSS);
        session.boss_active = true;
        session.defeated = 3;
        session.enemy.lives = 1;
        session.enemy.life = 50;

        let events = session.player_turn(&mut dice, &mut coins).unwrap();
        assert_eq!(coins, 15);
        assert!(!session.boss_active);
        assert_eq!(session.defeated, 0);
        assert_ne!(session.enemy.role, Role::Boss);
        assert!(events.contains(&BattleEvent::FightEnded(FightEnd {
            result: FightResult::Victory,
            reward_issued: 15,
        })));
    }
}
