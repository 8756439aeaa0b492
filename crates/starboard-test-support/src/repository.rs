//! Test repositories — `RatingRepository` implementations for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use starboard_core::error::DomainError;
use starboard_core::rating::{NewRating, RatingAverage, RatingEntry};
use starboard_core::repository::RatingRepository;

/// A process-local rating store that behaves like the SQL backends: ids are
/// assigned sequentially from 1, averages are rounded the same way, and
/// recency ordering is `created_at` then `id`, both descending.
///
/// Every trait call is counted so tests can assert that storage was not
/// touched.
#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    rows: Mutex<Vec<(i64, NewRating)>>,
    calls: AtomicUsize,
}

impl InMemoryRatingRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every inserted rating, audit fields included.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn inserted(&self) -> Vec<NewRating> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|(_, rating)| rating.clone())
            .collect()
    }

    /// Number of `RatingRepository` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn insert(&self, rating: &NewRating) -> Result<i64, DomainError> {
        self.record_call();
        let mut rows = self.rows.lock().unwrap();
        let id = rows.last().map_or(1, |(id, _)| id + 1);
        rows.push((id, rating.clone()));
        Ok(id)
    }

    async fn average(&self, subject_id: &str) -> Result<RatingAverage, DomainError> {
        self.record_call();
        let rows = self.rows.lock().unwrap();
        let (sum, count) = rows
            .iter()
            .filter(|(_, rating)| rating.subject_id == subject_id)
            .fold((0_u32, 0_u32), |(sum, count), (_, rating)| {
                (sum + u32::from(rating.value.get()), count + 1)
            });
        let mean = (count > 0).then(|| f64::from(sum) / f64::from(count));
        Ok(RatingAverage::from_raw(mean, i64::from(count)))
    }

    async fn recent(&self, subject_id: &str, limit: u32) -> Result<Vec<RatingEntry>, DomainError> {
        self.record_call();
        let rows = self.rows.lock().unwrap();
        let mut entries: Vec<RatingEntry> = rows
            .iter()
            .filter(|(_, rating)| rating.subject_id == subject_id)
            .map(|(id, rating)| RatingEntry {
                id: *id,
                value: rating.value,
                created_at: rating.created_at,
            })
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(entries)
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing the generic 500 paths.
#[derive(Debug)]
pub struct FailingRatingRepository;

#[async_trait]
impl RatingRepository for FailingRatingRepository {
    async fn insert(&self, _rating: &NewRating) -> Result<i64, DomainError> {
        Err(DomainError::Infrastructure("disk I/O error".into()))
    }

    async fn average(&self, _subject_id: &str) -> Result<RatingAverage, DomainError> {
        Err(DomainError::Infrastructure("disk I/O error".into()))
    }

    async fn recent(&self, _subject_id: &str, _limit: u32) -> Result<Vec<RatingEntry>, DomainError> {
        Err(DomainError::Infrastructure("disk I/O error".into()))
    }
}

/// A repository whose backing store cannot be reached.
#[derive(Debug)]
pub struct UnavailableRatingRepository;

#[async_trait]
impl RatingRepository for UnavailableRatingRepository {
    async fn insert(&self, _rating: &NewRating) -> Result<i64, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn average(&self, _subject_id: &str) -> Result<RatingAverage, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn recent(&self, _subject_id: &str, _limit: u32) -> Result<Vec<RatingEntry>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }
}
