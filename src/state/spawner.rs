use crate::dice::Dice;
use crate::model::{BOSS, BOSS_THRESHOLD, CharacterInstance, CharacterTemplate, HEROES, REGULAR_ENEMY_LIVES};
use crate::util::clog;

/// Next opponent plus the updated escalation counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub enemy: CharacterInstance,
    pub defeated: u32,
    pub boss_active: bool,
}

/// Picks the next opponent.
///
/// After `BOSS_THRESHOLD` regular defeats the boss appears; once the boss is down
/// the counters reset and regular opponents resume.
pub fn spawn_next(
    player: &CharacterTemplate,
    defeated: u32,
    boss_active: bool,
    dice: &mut dyn Dice,
) -> Spawn {
    if defeated >= BOSS_THRESHOLD && !boss_active {
        clog(&format!("[spawn] boss {} appears after {defeated} defeats", BOSS.name));
        return Spawn {
            enemy: CharacterInstance::spawn(&BOSS),
            defeated,
            boss_active: true,
        };
    }
    // Post-boss: start a fresh escalation cycle.
    let defeated = if boss_active { 0 } else { defeated };
    Spawn {
        enemy: spawn_regular(player, dice),
        defeated,
        boss_active: false,
    }
}

fn spawn_regular(player: &CharacterTemplate, dice: &mut dyn Dice) -> CharacterInstance {
    let eligible: Vec<&CharacterTemplate> =
        HEROES.iter().filter(|h| h.name != player.name).collect();
    let template = eligible[dice.index(eligible.len())];
    clog(&format!("[spawn] {} enters the arena", template.name));
    CharacterInstance::with_lives(template, REGULAR_ENEMY_LIVES)
}
