//! Domain layer of the ratings context.

pub mod commands;
pub mod limits;
pub mod stars;
pub mod validation;
