//! Starboard — service provider ratings bounded context.
//!
//! Responsible for validating rating submissions, appending them to the
//! rating store, and shaping the average, summary and listing read models.

pub mod application;
pub mod domain;
