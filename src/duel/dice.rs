//! Dice rolling system
//!
//! Uniform die rolls and multi-die aggregation with critical detection.
//! A roll is critical when at least one die shows its maximum face.

use rand::Rng;

/// Result of rolling one or more dice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// Sum of all individual dice
    pub total: u32,
    /// Individual die results, in roll order
    pub rolls: Vec<u32>,
    /// Whether any die showed its maximum face
    pub critical: bool,
}

impl RollOutcome {
    /// Render the individual dice joined by '+', e.g. "3+5"
    pub fn faces(&self) -> String {
        self.rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Roll a single die with the given number of sides
pub fn roll_die(sides: u32) -> u32 {
    rand::rng().random_range(1..=sides)
}

/// Roll `count` dice of `sides` sides and aggregate the results
pub fn roll_dice(count: u32, sides: u32) -> RollOutcome {
    let mut rng = rand::rng();
    let mut rolls = Vec::with_capacity(count as usize);
    let mut total = 0;
    let mut critical = false;

    for _ in 0..count {
        let roll = rng.random_range(1..=sides);
        rolls.push(roll);
        total += roll;
        if roll == sides {
            critical = true;
        }
    }

    RollOutcome {
        total,
        rolls,
        critical,
    }
}
