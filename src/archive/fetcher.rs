//! The fetch-retry pipeline: one location at a time, tiered retries,
//! fixed courtesy delay between locations.

use crate::archive::error::FetchError;
use crate::archive::request::ArchiveRequest;
use crate::archive::response::parse_daily_response;
use crate::archive::settings::FetchSettings;
use crate::archive::transport::{ArchiveTransport, TransportError};
use crate::types::daily_record::DailyRecord;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use log::{info, warn};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;

/// Result of fetching one location. Exactly one is produced per location.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Records in the order the archive returned them.
    Success(Vec<DailyRecord>),
    /// The final error once the retry policy gave up.
    Failure(FetchError),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn records(&self) -> Option<&[DailyRecord]> {
        match self {
            FetchOutcome::Success(records) => Some(records),
            FetchOutcome::Failure(_) => None,
        }
    }
}

/// The outcome of one location together with how it was obtained.
#[derive(Debug)]
pub struct LocationOutcome {
    pub location: Location,
    pub outcome: FetchOutcome,
    /// Number of requests sent for this location.
    pub attempts: usize,
}

/// Sequential client for the daily archive.
pub struct DailyFetcher<T> {
    transport: T,
    settings: FetchSettings,
}

impl<T: ArchiveTransport> DailyFetcher<T> {
    pub fn new(transport: T, settings: FetchSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the daily series of one location for `range`, applying the
    /// retry policy. Never fails: every error ends up in [`FetchOutcome::Failure`].
    pub async fn fetch_one(&self, location: &Location, range: &DateRange) -> FetchOutcome {
        self.fetch_counted(location, range).await.0
    }

    /// Fetches every location in order, waiting the courtesy delay between
    /// two consecutive locations (not after the last one).
    pub async fn fetch_all(
        &self,
        locations: &[Location],
        range: &DateRange,
    ) -> Vec<LocationOutcome> {
        let total = locations.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, location) in locations.iter().enumerate() {
            if index > 0 {
                sleep(self.settings.courtesy_delay).await;
            }

            info!("[{}/{}] Fetching {}...", index + 1, total, location.name);
            let (outcome, attempts) = self.fetch_counted(location, range).await;
            match &outcome {
                FetchOutcome::Success(records) => info!(
                    "[{}/{}] {}: {} records (attempt {})",
                    index + 1,
                    total,
                    location.name,
                    records.len(),
                    attempts
                ),
                FetchOutcome::Failure(error) => warn!(
                    "[{}/{}] {}: skipped after {} attempt(s): {}",
                    index + 1,
                    total,
                    location.name,
                    attempts,
                    error
                ),
            }

            outcomes.push(LocationOutcome {
                location: location.clone(),
                outcome,
                attempts,
            });
        }

        let successes = outcomes.iter().filter(|o| o.outcome.is_success()).count();
        info!(
            "Fetched {} locations: {} successful, {} failed",
            total,
            successes,
            total - successes
        );
        outcomes
    }

    async fn fetch_counted(&self, location: &Location, range: &DateRange) -> (FetchOutcome, usize) {
        let request = ArchiveRequest::new(
            &self.settings.endpoint,
            location,
            range,
            &self.settings.timezone,
        );
        let policy = &self.settings.retry_policy;
        let mut first_failure = None;
        let mut attempt = 1;

        loop {
            let tier = policy.tier(attempt);
            if attempt > 1 {
                sleep(tier.delay_before).await;
            }

            let error = match self.attempt(&request, location, range, tier.timeout).await {
                Ok(records) => return (FetchOutcome::Success(records), attempt),
                Err(error) => error,
            };

            let classification = error.classification();
            // Escalation only continues while the failure class stays the same.
            let trigger = *first_failure.get_or_insert(classification);
            if !policy.should_retry(trigger, classification, attempt) {
                return (FetchOutcome::Failure(error), attempt);
            }

            attempt += 1;
            warn!(
                "{}: {} on attempt {}, waiting {}s before attempt {}",
                location.name,
                classification,
                attempt - 1,
                policy.tier(attempt).delay_before.as_secs(),
                attempt
            );
        }
    }

    /// One request and its classification.
    async fn attempt(
        &self,
        request: &ArchiveRequest,
        location: &Location,
        range: &DateRange,
        timeout: Duration,
    ) -> Result<Vec<DailyRecord>, FetchError> {
        let reply = self
            .transport
            .get(request, timeout)
            .await
            .map_err(|e| match e {
                TransportError::Timeout => FetchError::Timeout(timeout),
                TransportError::Network(source) => FetchError::Network(source),
            })?;

        if reply.status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !reply.status.is_success() {
            return Err(FetchError::HttpStatus(reply.status));
        }

        parse_daily_response(&reply.body, location, range)
    }
}
