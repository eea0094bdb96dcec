//! trivia-core — Core game engine, traits, and scoring.
//!
//! This crate defines the data model, the narrow store and view contracts,
//! and the round/score/ledger/session logic that the rest of trivia builds on.

pub mod error;
pub mod game;
pub mod ledger;
pub mod memory;
pub mod model;
pub mod round;
pub mod scorer;
pub mod session;
pub mod traits;
pub mod view;
