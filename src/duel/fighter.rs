//! Fighter entity
//!
//! A fighter holds a name, bounded health, and its effect ledger. Two
//! instances exist for the lifetime of one duel, owned by the duel state.

use serde::Serialize;

use super::effects::{EffectLedger, Modifiers};

/// Maximum (and starting) health of every fighter
pub const MAX_HEALTH: i32 = 100;

/// One of the two duel participants
#[derive(Debug, Clone, Serialize)]
pub struct Fighter {
    /// Display name
    pub name: String,
    /// Current health, always in [0, max_health]
    pub health: i32,
    /// Maximum health
    pub max_health: i32,
    /// Active timed effects
    pub effects: EffectLedger,
}

impl Fighter {
    /// Create a fresh fighter at full health with no effects
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            effects: EffectLedger::new(),
        }
    }

    /// Check if the fighter has been defeated
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Subtract damage, flooring health at 0. Returns health actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0);
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Aggregate attack/defense modifiers from the effect ledger
    pub fn modifiers(&self) -> Modifiers {
        self.effects.modifiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::effects::EffectKind;

    #[test]
    fn test_new_fighter() {
        let fighter = Fighter::new("Player 1");

        assert_eq!(fighter.name, "Player 1");
        assert_eq!(fighter.health, MAX_HEALTH);
        assert_eq!(fighter.max_health, MAX_HEALTH);
        assert!(fighter.effects.is_empty());
        assert!(!fighter.is_defeated());
    }

    #[test]
    fn test_take_damage() {
        let mut fighter = Fighter::new("Player 1");

        let lost = fighter.take_damage(30);
        assert_eq!(lost, 30);
        assert_eq!(fighter.health, 70);
        assert!(!fighter.is_defeated());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut fighter = Fighter::new("Player 1");
        fighter.health = 10;

        let lost = fighter.take_damage(25);
        assert_eq!(lost, 10);
        assert_eq!(fighter.health, 0);
        assert!(fighter.is_defeated());
    }

    #[test]
    fn test_zero_damage() {
        let mut fighter = Fighter::new("Player 1");

        let lost = fighter.take_damage(0);
        assert_eq!(lost, 0);
        assert_eq!(fighter.health, MAX_HEALTH);
    }

    #[test]
    fn test_modifiers_delegate() {
        let mut fighter = Fighter::new("Player 1");
        fighter.effects.add(EffectKind::AttackBoost, 3);
        fighter.effects.add(EffectKind::DefensePenalty, 3);

        let mods = fighter.modifiers();
        assert_eq!(mods.attack, 2);
        assert_eq!(mods.defense, -2);
    }
}
