//! Duel flow scenario tests
//!
//! Drives complete duels through the public API and checks the state-machine
//! invariants after every operation.

use diceduel::duel::{Duel, Phase, PlayerId, LOG_CAPACITY};

/// Invariants that must hold after every public operation
fn assert_invariants(duel: &Duel) {
    for id in [PlayerId::One, PlayerId::Two] {
        let fighter = duel.fighter(id);
        assert!(
            fighter.health >= 0 && fighter.health <= fighter.max_health,
            "health {} out of bounds for {}",
            fighter.health,
            fighter.name
        );
    }
    assert_eq!(
        duel.pending_attack().is_some(),
        duel.phase() == Phase::Defense,
        "pending attack must exist exactly in the defense phase"
    );
    assert!(duel.log().len() <= LOG_CAPACITY);
}

#[test]
fn test_full_round_trip() {
    let mut duel = Duel::default();

    duel.attack(PlayerId::One);
    assert_invariants(&duel);
    assert_eq!(duel.phase(), Phase::Defense);
    assert_eq!(
        duel.pending_attack().map(|p| p.attacker),
        Some(PlayerId::One)
    );

    duel.defend(PlayerId::Two);
    assert_invariants(&duel);
    assert!(duel.pending_attack().is_none());
    assert_eq!(duel.phase(), Phase::Buff);
    assert_eq!(duel.active_player(), PlayerId::Two);
}

#[test]
fn test_reset_idempotent() {
    let mut duel = Duel::new("Alice", "Bob");
    duel.buff(PlayerId::One);
    duel.attack(PlayerId::One);
    duel.defend(PlayerId::Two);

    duel.reset();
    let first = serde_json::to_value(duel.snapshot()).expect("serialize");
    duel.reset();
    let second = serde_json::to_value(duel.snapshot()).expect("serialize");

    assert_eq!(first, second);
    assert!(!duel.is_over());
    assert_eq!(duel.fighter(PlayerId::One).health, 100);
    assert_eq!(duel.fighter(PlayerId::Two).health, 100);
}

#[test]
fn test_complete_duel() {
    let mut duel = Duel::default();

    // Play buff -> attack -> defend rounds until someone falls
    for _ in 0..10_000 {
        if duel.is_over() {
            break;
        }
        let attacker = duel.active_player();

        duel.buff(attacker);
        assert_invariants(&duel);

        duel.attack(attacker);
        assert_invariants(&duel);

        duel.defend(attacker.opponent());
        assert_invariants(&duel);
    }

    assert!(duel.is_over(), "duel did not finish");
    let winner = duel.winner().expect("winner once over");
    let loser = winner.opponent();
    assert_eq!(duel.fighter(loser).health, 0);
    assert!(duel.fighter(winner).health > 0);
    assert!(duel
        .log()
        .iter()
        .any(|l| l.contains(&duel.fighter(winner).name) && l.contains("wins")));
}

#[test]
fn test_game_over_locks_state() {
    let mut duel = Duel::default();

    for _ in 0..10_000 {
        if duel.is_over() {
            break;
        }
        let attacker = duel.active_player();
        duel.attack(attacker);
        duel.defend(attacker.opponent());
    }
    assert!(duel.is_over());

    let healths = (
        duel.fighter(PlayerId::One).health,
        duel.fighter(PlayerId::Two).health,
    );
    let effect_counts = (
        duel.fighter(PlayerId::One).effects.len(),
        duel.fighter(PlayerId::Two).effects.len(),
    );

    for id in [PlayerId::One, PlayerId::Two] {
        duel.buff(id);
        duel.attack(id);
        duel.defend(id);
        assert_invariants(&duel);
    }

    assert_eq!(duel.fighter(PlayerId::One).health, healths.0);
    assert_eq!(duel.fighter(PlayerId::Two).health, healths.1);
    assert_eq!(duel.fighter(PlayerId::One).effects.len(), effect_counts.0);
    assert_eq!(duel.fighter(PlayerId::Two).effects.len(), effect_counts.1);
    assert!(duel.is_over());
}

#[test]
fn test_illegal_actions_only_log() {
    let mut duel = Duel::default();

    // Defense with nothing pending
    duel.defend(PlayerId::Two);
    assert_eq!(duel.log().len(), 1);
    assert_invariants(&duel);

    // Out-of-turn buff and attack
    duel.buff(PlayerId::Two);
    duel.attack(PlayerId::Two);
    assert_eq!(duel.log().len(), 3);
    assert_invariants(&duel);

    assert_eq!(duel.phase(), Phase::Buff);
    assert_eq!(duel.active_player(), PlayerId::One);
    assert_eq!(duel.fighter(PlayerId::One).health, 100);
    assert_eq!(duel.fighter(PlayerId::Two).health, 100);
}

#[test]
fn test_independent_duels() {
    let mut first = Duel::default();
    let mut second = Duel::default();

    first.attack(PlayerId::One);

    // The second duel is unaffected by the first
    assert_eq!(second.phase(), Phase::Buff);
    assert!(second.pending_attack().is_none());
    assert!(second.log().is_empty());

    second.buff(PlayerId::One);
    assert_eq!(first.phase(), Phase::Defense);
}
