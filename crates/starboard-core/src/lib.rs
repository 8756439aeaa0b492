//! Starboard Core — shared domain abstractions.
//!
//! This crate defines the rating primitives, the storage trait and the error
//! type that every other crate depends on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod rating;
pub mod repository;
