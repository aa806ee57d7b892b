//! Dice-duel game engine
//!
//! Implements a two-player dice duel with:
//! - Dice rolling with critical detection
//! - Timed attack/defense effects from buff rolls
//! - A buff -> attack -> defense turn cycle
//! - Damage resolution and win detection
//! - A capped, newest-first battle log

mod damage;
mod dice;
mod effects;
mod fighter;
mod state;

pub use damage::{resolve as resolve_damage, DamageOutcome};
pub use dice::{roll_dice, roll_die, RollOutcome};
pub use effects::{Effect, EffectKind, EffectLedger, Modifiers, EFFECT_MAGNITUDE};
pub use fighter::{Fighter, MAX_HEALTH};
pub use state::{Duel, DuelSnapshot, FighterView, PendingAttack, Phase, PlayerId, LOG_CAPACITY};
