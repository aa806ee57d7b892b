//! Damage resolution
//!
//! Computes the damage an attack deals once the defense roll is known:
//! - Base damage is the attack total minus the defense total, floored at 0
//! - A critical attack doubles the damage AFTER the subtraction

/// Outcome of resolving an attack total against a defense total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Damage before critical doubling
    pub base: i32,
    /// Final damage to apply
    pub amount: i32,
    /// Whether critical doubling was applied (base > 0 and the attack was critical)
    pub doubled: bool,
}

/// Resolve an attack against a defense
pub fn resolve(attack_total: i32, defense_total: i32, critical: bool) -> DamageOutcome {
    let base = (attack_total - defense_total).max(0);
    let doubled = critical && base > 0;
    let amount = if doubled { base * 2 } else { base };

    DamageOutcome {
        base,
        amount,
        doubled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_damage() {
        let outcome = resolve(10, 6, false);
        assert_eq!(outcome.base, 4);
        assert_eq!(outcome.amount, 4);
        assert!(!outcome.doubled);
    }

    #[test]
    fn test_critical_doubles_after_subtraction() {
        // (10 - 6) * 2 = 8, not (10 * 2) - 6 = 14
        let outcome = resolve(10, 6, true);
        assert_eq!(outcome.base, 4);
        assert_eq!(outcome.amount, 8);
        assert!(outcome.doubled);
    }

    #[test]
    fn test_successful_defense() {
        let outcome = resolve(7, 9, false);
        assert_eq!(outcome.amount, 0);
        assert!(!outcome.doubled);
    }

    #[test]
    fn test_tie_deals_nothing() {
        let outcome = resolve(8, 8, false);
        assert_eq!(outcome.amount, 0);
    }

    #[test]
    fn test_critical_cannot_rescue_blocked_attack() {
        // Doubling applies to the post-subtraction value, so a fully
        // blocked critical still deals nothing
        let outcome = resolve(6, 9, true);
        assert_eq!(outcome.base, 0);
        assert_eq!(outcome.amount, 0);
        assert!(!outcome.doubled);
    }
}
