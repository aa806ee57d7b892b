//! diceduel - two-player dice-duel game engine
//!
//! The engine lives in [`duel`]: two fighters alternate through buff, attack,
//! and defense phases until one is reduced to zero health. Callers read the
//! state after each action and render it; the four operations on
//! [`duel::Duel`] are the only mutation entry points.

pub mod duel;

pub use duel::{Duel, DuelSnapshot, PlayerId};
