//! Route modules.

pub mod embed;
pub mod health;
pub mod public;
pub mod ratings;
