use std::collections::VecDeque;
use std::rc::Rc;

use yew::Reducible;

use crate::dice::{Dice, SeededDice};
use crate::model::hero_by_name;
use crate::state::battle::BattleSession;
use crate::state::events::BattleEvent;
use crate::state::profile::Profile;
use crate::state::shop::Shop;
#[cfg(target_arch = "wasm32")]
use crate::dice::BrowserDice;
#[cfg(target_arch = "wasm32")]
use crate::store::{LocalStorage, StoreError};
use crate::store::KeyValueStore;
use crate::util::{clog, cwarn};

/// Battle log entries kept for display; older ones scroll away.
pub const LOG_CAPACITY: usize = 64;

/// Everything the front-end needs: progression, shop, the current fight and its log.
#[derive(Clone, Debug)]
pub struct Arena<S, D = SeededDice> {
    pub profile: Profile<S>,
    pub shop: Shop,
    pub session: Option<BattleSession>,
    /// Latest events of the current session, oldest first, at most `LOG_CAPACITY`.
    pub log: Rc<VecDeque<BattleEvent>>,
    /// Last rejected action, shown to the player.
    pub notice: Option<String>,
    dice: D,
}

impl<S: KeyValueStore> Arena<S> {
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_dice(store, SeededDice::new(seed))
    }
}

#[cfg(target_arch = "wasm32")]
impl Arena<LocalStorage, BrowserDice> {
    /// Progress from `window.localStorage`, rolls from `Math.random()`.
    pub fn in_browser() -> Result<Self, StoreError> {
        Ok(Self::with_dice(LocalStorage::open()?, BrowserDice))
    }
}

impl<S: KeyValueStore, D: Dice> Arena<S, D> {
    pub fn with_dice(store: S, dice: D) -> Self {
        Self {
            profile: Profile::load(store),
            shop: Shop::new(),
            session: None,
            log: Rc::new(VecDeque::new()),
            notice: None,
            dice,
        }
    }

    fn push_events(&mut self, events: Vec<BattleEvent>) {
        let log = Rc::make_mut(&mut self.log);
        for ev in events {
            clog(&ev.to_json_line());
            if log.len() == LOG_CAPACITY {
                log.pop_front();
            }
            log.push_back(ev);
        }
    }

    fn reject(&mut self, msg: String) {
        cwarn(&format!("[arena] {msg}"));
        self.notice = Some(msg);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaAction {
    SelectHero(String),
    PlayerAttack,
    /// Dispatched by the front-end after its turn delay.
    EnemyTurn,
    Escape,
    Purchase { skill_id: String, price: u64 },
    AssignSkill { hero: String },
    CancelPurchase,
    ResetProgress,
}

impl<S, D> Reducible for Arena<S, D>
where
    S: KeyValueStore + Clone + 'static,
    D: Dice + Clone + 'static,
{
    type Action = ArenaAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ArenaAction::*;
        let mut new = (*self).clone();
        new.notice = None;
        match action {
            SelectHero(name) => {
                let Some(hero) = hero_by_name(&name) else {
                    new.reject(format!("unknown hero {name}"));
                    return Rc::new(new);
                };
                let (session, events) =
                    BattleSession::start(hero, new.profile.assignments(), &mut new.dice);
                new.session = Some(session);
                new.log = Rc::new(VecDeque::new());
                new.push_events(events);
            }
            PlayerAttack => {
                let result = match new.session.as_mut() {
                    Some(session) => session
                        .player_turn(&mut new.dice, &mut new.profile)
                        .map_err(|e| e.to_string()),
                    None => Err("no battle in progress".to_string()),
                };
                match result {
                    Ok(events) => new.push_events(events),
                    Err(msg) => new.reject(msg),
                }
            }
            EnemyTurn => {
                let result = match new.session.as_mut() {
                    Some(session) => session.enemy_turn(&mut new.dice).map_err(|e| e.to_string()),
                    None => Err("no battle in progress".to_string()),
                };
                match result {
                    Ok(events) => new.push_events(events),
                    Err(msg) => new.reject(msg),
                }
            }
            Escape => {
                let result = match new.session.as_mut() {
                    Some(session) => session.escape().map_err(|e| e.to_string()),
                    None => Err("no battle in progress".to_string()),
                };
                match result {
                    Ok(ev) => {
                        new.push_events(vec![ev]);
                        new.session = None;
                    }
                    Err(msg) => new.reject(msg),
                }
            }
            Purchase { skill_id, price } => {
                if let Err(e) = new.shop.purchase(&new.profile, &skill_id, price) {
                    new.reject(e.to_string());
                }
            }
            AssignSkill { hero } => {
                if let Err(e) = new.shop.assign_to_hero(&mut new.profile, &hero) {
                    new.reject(e.to_string());
                }
            }
            CancelPurchase => new.shop.cancel(),
            ResetProgress => {
                new.shop.cancel();
                if let Err(e) = new.profile.reset() {
                    new.reject(e.to_string());
                }
            }
        }
        Rc::new(new)
    }
}
