//! Duel state machine
//!
//! Tracks a single duel between two fighters:
//! - Whose turn it is and which phase the turn is in
//! - The pending attack awaiting a defense roll
//! - The battle log and game-over status
//!
//! The four public operations (`buff`, `attack`, `defend`, `reset`) are the
//! only mutation entry points. Illegal invocations append one log line and
//! leave the rest of the state untouched.

use std::collections::VecDeque;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::damage;
use super::dice::{roll_dice, roll_die};
use super::effects::{Effect, EffectKind, Modifiers};
use super::fighter::Fighter;

/// Maximum battle log entries kept (newest first, oldest evicted)
pub const LOG_CAPACITY: usize = 200;

/// Sides on the buff die
const BUFF_DIE_SIDES: u32 = 6;
/// Dice rolled for attacks and defenses
const COMBAT_DICE: u32 = 2;
/// Sides on each combat die
const COMBAT_DIE_SIDES: u32 = 6;
/// How many rounds a rolled buff or penalty lasts
const BUFF_DURATION: u32 = 3;

/// Identifies one of the two duel participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The other participant
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl FromStr for PlayerId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "p1" | "one" => Ok(PlayerId::One),
            "2" | "p2" | "two" => Ok(PlayerId::Two),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::One => write!(f, "Player 1"),
            PlayerId::Two => write!(f, "Player 2"),
        }
    }
}

/// Sub-step within a turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active attacker may roll a buff (or skip straight to attacking)
    Buff,
    /// Active attacker rolls the attack
    Attack,
    /// Defender rolls against the pending attack
    Defense,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Buff => "buff",
            Phase::Attack => "attack",
            Phase::Defense => "defense",
        };
        write!(f, "{}", s)
    }
}

/// An attack that has been rolled but not yet defended against.
/// Exists exactly while the duel is in the defense phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAttack {
    /// Who rolled the attack
    pub attacker: PlayerId,
    /// Individual die faces of the attack roll
    pub rolls: Vec<u32>,
    /// Attack roll plus the attacker's attack modifier
    pub total: i32,
    /// Whether the raw roll was critical (doubles damage after subtraction)
    pub critical: bool,
}

/// Read-only view of one fighter for rendering
#[derive(Debug, Clone, Serialize)]
pub struct FighterView {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub effects: Vec<Effect>,
    pub modifiers: Modifiers,
}

/// Read-only view of the whole duel for rendering
#[derive(Debug, Clone, Serialize)]
pub struct DuelSnapshot {
    pub players: [FighterView; 2],
    pub active: PlayerId,
    pub phase: Phase,
    pub pending_attack: Option<PendingAttack>,
    pub game_over: bool,
    /// Battle log, most recent entry first
    pub log: Vec<String>,
}

/// The complete mutable state of one duel
#[derive(Debug, Clone)]
pub struct Duel {
    fighters: [Fighter; 2],
    active: PlayerId,
    phase: Phase,
    pending: Option<PendingAttack>,
    over: bool,
    log: VecDeque<String>,
}

impl Default for Duel {
    fn default() -> Self {
        Self::new("Player 1", "Player 2")
    }
}

impl Duel {
    /// Start a fresh duel between two named fighters. Player 1 attacks first.
    pub fn new(name_one: impl Into<String>, name_two: impl Into<String>) -> Self {
        Self {
            fighters: [Fighter::new(name_one), Fighter::new(name_two)],
            active: PlayerId::One,
            phase: Phase::Buff,
            pending: None,
            over: false,
            log: VecDeque::new(),
        }
    }

    /// The fighter controlled by `id`
    pub fn fighter(&self, id: PlayerId) -> &Fighter {
        &self.fighters[id.index()]
    }

    fn fighter_mut(&mut self, id: PlayerId) -> &mut Fighter {
        &mut self.fighters[id.index()]
    }

    /// Whose turn it is to buff/attack
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Current phase of the turn cycle
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The attack awaiting a defense roll, if any
    pub fn pending_attack(&self) -> Option<&PendingAttack> {
        self.pending.as_ref()
    }

    /// Whether the duel has ended
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The victor, once the duel has ended
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.over {
            return None;
        }
        if self.fighter(PlayerId::One).is_defeated() {
            Some(PlayerId::Two)
        } else {
            Some(PlayerId::One)
        }
    }

    /// Battle log, most recent entry first
    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    /// Whether `id` may roll a buff right now
    pub fn can_buff(&self, id: PlayerId) -> bool {
        !self.over && self.active == id && self.phase == Phase::Buff
    }

    /// Whether `id` may attack right now
    pub fn can_attack(&self, id: PlayerId) -> bool {
        !self.over
            && self.active == id
            && matches!(self.phase, Phase::Buff | Phase::Attack)
            && self.pending.is_none()
    }

    /// Whether `id` may defend right now
    pub fn can_defend(&self, id: PlayerId) -> bool {
        !self.over
            && self.phase == Phase::Defense
            && self.pending.as_ref().is_some_and(|p| p.attacker != id)
    }

    /// Build a read-only snapshot for rendering
    pub fn snapshot(&self) -> DuelSnapshot {
        let view = |f: &Fighter| FighterView {
            name: f.name.clone(),
            health: f.health,
            max_health: f.max_health,
            effects: f.effects.iter().cloned().collect(),
            modifiers: f.modifiers(),
        };

        DuelSnapshot {
            players: [view(&self.fighters[0]), view(&self.fighters[1])],
            active: self.active,
            phase: self.phase,
            pending_attack: self.pending.clone(),
            game_over: self.over,
            log: self.log.iter().cloned().collect(),
        }
    }

    /// Roll the buff die for `id`.
    ///
    /// 1-2: nothing. 3-4: +2 ATK for 3 rounds. 5: +2 DEF for 3 rounds.
    /// 6: the opponent takes -2 DEF for 3 rounds. The phase does not
    /// advance, so the attacker may still attack this turn.
    pub fn buff(&mut self, id: PlayerId) {
        if self.over {
            self.push_log("The duel is over.".to_string());
            return;
        }
        if self.active != id {
            let line = format!("It is not {}'s turn to roll a buff.", self.fighter(id).name);
            self.push_log(line);
            return;
        }
        if self.phase != Phase::Buff {
            let line = format!("Buffs cannot be rolled in the {} phase.", self.phase);
            self.push_log(line);
            return;
        }

        let roll = roll_die(BUFF_DIE_SIDES);
        let summary = match roll {
            1..=2 => "no effect.".to_string(),
            3..=4 => {
                self.fighter_mut(id)
                    .effects
                    .add(EffectKind::AttackBoost, BUFF_DURATION);
                format!("+2 ATK for {} rounds.", BUFF_DURATION)
            }
            5 => {
                self.fighter_mut(id)
                    .effects
                    .add(EffectKind::DefenseBoost, BUFF_DURATION);
                format!("+2 DEF for {} rounds.", BUFF_DURATION)
            }
            _ => {
                let opponent = id.opponent();
                self.fighter_mut(opponent)
                    .effects
                    .add(EffectKind::DefensePenalty, BUFF_DURATION);
                format!(
                    "{} suffers -2 DEF for {} rounds.",
                    self.fighter(opponent).name,
                    BUFF_DURATION
                )
            }
        };

        debug!(player = %id, roll, "buff roll");
        let line = format!(
            "{} rolls a buff (1d6={}): {}",
            self.fighter(id).name,
            roll,
            summary
        );
        self.push_log(line);
    }

    /// Roll the attack for `id`: 2d6 plus the attacker's attack modifier.
    /// Records the result as the pending attack and enters the defense phase.
    pub fn attack(&mut self, id: PlayerId) {
        if self.over {
            self.push_log("The duel is over.".to_string());
            return;
        }
        if self.active != id {
            let line = format!("It is not {}'s turn to attack.", self.fighter(id).name);
            self.push_log(line);
            return;
        }
        if self.pending.is_some() {
            self.push_log("An attack is already waiting to be resolved.".to_string());
            return;
        }
        if !matches!(self.phase, Phase::Buff | Phase::Attack) {
            let line = format!("Attacks cannot be made in the {} phase.", self.phase);
            self.push_log(line);
            return;
        }

        let roll = roll_dice(COMBAT_DICE, COMBAT_DIE_SIDES);
        let mods = self.fighter(id).modifiers();
        let total = roll.total as i32 + mods.attack;

        debug!(player = %id, total, critical = roll.critical, "attack roll");
        let line = format!(
            "{} attacks: 2d6 ({}) {:+} = {}{}",
            self.fighter(id).name,
            roll.faces(),
            mods.attack,
            total,
            if roll.critical { " (critical threat!)" } else { "" }
        );
        self.push_log(line);

        self.pending = Some(PendingAttack {
            attacker: id,
            rolls: roll.rolls,
            total,
            critical: roll.critical,
        });
        self.phase = Phase::Defense;
    }

    /// Roll the defense for `id` against the pending attack and resolve the
    /// round: apply damage, tick both effect ledgers, flip the active
    /// attacker, and detect victory.
    pub fn defend(&mut self, id: PlayerId) {
        if self.over {
            self.push_log("The duel is over.".to_string());
            return;
        }
        if self.phase != Phase::Defense {
            self.push_log("There is no attack to defend against.".to_string());
            return;
        }
        let Some(pending) = self.pending.clone() else {
            self.push_log("There is no pending attack.".to_string());
            return;
        };
        if pending.attacker == id {
            let line = format!(
                "{} cannot defend against their own attack.",
                self.fighter(id).name
            );
            self.push_log(line);
            return;
        }

        let roll = roll_dice(COMBAT_DICE, COMBAT_DIE_SIDES);
        let mods = self.fighter(id).modifiers();
        let defense_total = roll.total as i32 + mods.defense;

        let line = format!(
            "{} defends: 2d6 ({}) {:+} = {}",
            self.fighter(id).name,
            roll.faces(),
            mods.defense,
            defense_total
        );
        self.push_log(line);

        let outcome = damage::resolve(pending.total, defense_total, pending.critical);
        if outcome.doubled {
            self.push_log("Critical hit! Damage doubled.".to_string());
        }

        debug!(
            defender = %id,
            defense_total,
            damage = outcome.amount,
            "defense resolved"
        );

        let attacker_name = self.fighter(pending.attacker).name.clone();
        if outcome.amount > 0 {
            self.fighter_mut(id).take_damage(outcome.amount);
            let line = format!(
                "{} deals {} damage to {}.",
                attacker_name,
                outcome.amount,
                self.fighter(id).name
            );
            self.push_log(line);
        } else {
            self.push_log("Successful defense! No damage.".to_string());
        }

        // The round is complete: effect durations burn down for both sides
        self.fighters[0].effects.tick_down();
        self.fighters[1].effects.tick_down();

        self.pending = None;
        self.phase = Phase::Buff;
        // The turn flips even on the decisive round; once the duel is over
        // every action is rejected, so the extra flip is unobservable
        self.active = self.active.opponent();

        if self.fighter(id).is_defeated() {
            self.over = true;
            self.push_log(format!("{} wins the duel!", attacker_name));
        }
    }

    /// Restart the duel: fresh fighters at full health, Player 1 to act,
    /// empty log. Calling reset twice in a row yields the same state.
    pub fn reset(&mut self) {
        debug!("duel reset");
        let name_one = self.fighters[0].name.clone();
        let name_two = self.fighters[1].name.clone();
        *self = Duel::new(name_one, name_two);
    }

    /// Prepend a log line, evicting the oldest entry past capacity
    fn push_log(&mut self, line: String) {
        self.log.push_front(line);
        self.log.truncate(LOG_CAPACITY);
    }
}
