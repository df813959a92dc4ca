//! Alternative PulseIDs for a taken candidate
//!
//! Suggestions are a presentation affordance. They are never checked before
//! being shown; picking one makes it the live candidate and runs the normal
//! check for it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Mutex;

use crate::shared::candidate::{is_handle_char, CandidateRules};

/// Generates numbered variants of a taken candidate
#[derive(Debug)]
pub struct SuggestionGenerator {
    rng: Mutex<StdRng>,
}

impl SuggestionGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Up to `count` distinct alternatives to `base`.
    ///
    /// The family is `{base}{100..=999}`, `{base}_{1..=99}` and
    /// `{base}{millis % 10000}`; extra slots fall back to more random numbers.
    pub fn generate(&self, base: &str, count: usize, rules: &CandidateRules) -> Vec<String> {
        let base: String = base.chars().filter(|c| is_handle_char(*c)).collect();
        if base.is_empty() || count == 0 {
            return Vec::new();
        }

        let millis = chrono::Utc::now().timestamp_millis().rem_euclid(10_000);
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut seen = HashSet::new();
        let mut suggestions = Vec::with_capacity(count);
        let mut attempt = 0usize;

        // Bounded: a short max_length can make distinct variants impossible
        while suggestions.len() < count && attempt < count * 10 {
            let suffix = match attempt {
                0 => rng.gen_range(100..=999u32).to_string(),
                1 => format!("_{}", rng.gen_range(1..=99u32)),
                2 => format!("{:04}", millis),
                _ => rng.gen_range(10..=9999u32).to_string(),
            };
            attempt += 1;

            let candidate = fit_to_length(&base, &suffix, rules.max_length);
            if candidate.chars().count() < rules.min_length || candidate == base {
                continue;
            }
            if seen.insert(candidate.clone()) {
                suggestions.push(candidate);
            }
        }

        suggestions
    }
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// `base + suffix`, with `base` truncated so the result fits in `max_length`
fn fit_to_length(base: &str, suffix: &str, max_length: usize) -> String {
    let suffix_len = suffix.chars().count();
    let keep = max_length.saturating_sub(suffix_len);
    let mut out: String = base.chars().take(keep).collect();
    out.push_str(suffix);
    out
}
