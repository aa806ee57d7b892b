//! Timed stat effects
//!
//! Manages the temporary modifiers a fighter can carry:
//! - Attack and defense boosts from buff rolls
//! - Defense penalties inflicted by the opponent
//! - Duration tracking (effects expire after a number of rounds)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How much a single boost or penalty shifts a stat
pub const EFFECT_MAGNITUDE: i32 = 2;

/// Kinds of timed effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// +2 to attack rolls
    AttackBoost,
    /// +2 to defense rolls
    DefenseBoost,
    /// -2 to defense rolls
    DefensePenalty,
}

impl EffectKind {
    /// Whether this effect is negative (a debuff)
    pub fn is_debuff(&self) -> bool {
        matches!(self, EffectKind::DefensePenalty)
    }
}

impl FromStr for EffectKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "atk+2" | "attack" => Ok(EffectKind::AttackBoost),
            "def+2" | "defense" => Ok(EffectKind::DefenseBoost),
            "def-2" | "penalty" => Ok(EffectKind::DefensePenalty),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EffectKind::AttackBoost => "+2 ATK",
            EffectKind::DefenseBoost => "+2 DEF",
            EffectKind::DefensePenalty => "-2 DEF",
        };
        write!(f, "{}", s)
    }
}

/// A timed effect instance on a fighter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Kind of effect
    pub kind: EffectKind,
    /// Rounds remaining before expiry (always > 0 while held)
    pub remaining_turns: u32,
}

/// Aggregate stat modifiers derived from a fighter's effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub attack: i32,
    pub defense: i32,
}

/// The ordered set of effects on a single fighter
#[derive(Debug, Clone, Default, Serialize)]
pub struct EffectLedger {
    effects: Vec<Effect>,
}

impl EffectLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect. Same-kind effects stack; duplicates coexist.
    pub fn add(&mut self, kind: EffectKind, turns: u32) {
        debug_assert!(turns > 0);
        self.effects.push(Effect {
            kind,
            remaining_turns: turns,
        });
    }

    /// Sum the stat contributions of every held effect
    pub fn modifiers(&self) -> Modifiers {
        let mut mods = Modifiers::default();
        for effect in &self.effects {
            match effect.kind {
                EffectKind::AttackBoost => mods.attack += EFFECT_MAGNITUDE,
                EffectKind::DefenseBoost => mods.defense += EFFECT_MAGNITUDE,
                EffectKind::DefensePenalty => mods.defense -= EFFECT_MAGNITUDE,
            }
        }
        mods
    }

    /// Decrement every effect's duration, dropping those that expire.
    /// Called once per fighter at the end of each resolved round.
    pub fn tick_down(&mut self) {
        for effect in &mut self.effects {
            effect.remaining_turns -= 1;
        }
        self.effects.retain(|e| e.remaining_turns > 0);
    }

    /// Check if a specific effect kind is present
    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Iterate over the held effects, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Number of held effects
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the ledger holds no effects
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
