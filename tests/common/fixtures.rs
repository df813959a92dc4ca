//! Checker and form fixtures

use std::sync::Arc;
use std::time::Duration;

use voicemate::availability::{
    AvailabilityBackend, AvailabilityCache, AvailabilityChecker, ReservationForm,
    SuggestionGenerator,
};
use voicemate::shared::AvailabilitySettings;

/// Default quiet interval of the checker
pub const DEBOUNCE: Duration = Duration::from_millis(600);

pub fn settings() -> AvailabilitySettings {
    AvailabilitySettings::default()
}

/// Cache with the default short TTL
pub fn short_cache() -> Arc<AvailabilityCache> {
    Arc::new(AvailabilityCache::with_ttl(settings().cache_ttl()))
}

/// Cache whose entries outlive any test
pub fn long_cache() -> Arc<AvailabilityCache> {
    Arc::new(AvailabilityCache::with_ttl(Duration::from_secs(3600)))
}

pub fn checker_with_cache(
    backend: Arc<dyn AvailabilityBackend>,
    cache: Arc<AvailabilityCache>,
) -> AvailabilityChecker {
    AvailabilityChecker::with_generator(backend, cache, settings(), SuggestionGenerator::seeded(42))
}

pub fn checker(backend: Arc<dyn AvailabilityBackend>) -> AvailabilityChecker {
    checker_with_cache(backend, short_cache())
}

pub fn form() -> ReservationForm {
    ReservationForm {
        email: "rick@citadel.dev".to_string(),
        password: "wubbalubba".to_string(),
        display_name: "Rick Sanchez".to_string(),
    }
}

/// Sleep just past the debounce interval
pub async fn past_debounce() {
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(50)).await;
}

/// Long enough for any scheduled check and its query to finish
pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}
