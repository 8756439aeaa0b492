//! Shared test mocks and utilities for the Starboard rating service.

mod clock;
mod repository;

pub use clock::{FixedClock, SteppingClock};
pub use repository::{FailingRatingRepository, InMemoryRatingRepository, UnavailableRatingRepository};
