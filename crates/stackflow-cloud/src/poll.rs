//! Stack status polling (exponential backoff)
//!
//! Queries the provider until the stack reaches a terminal status or the
//! attempt budget runs out. Only "still in progress" is retried; query
//! errors propagate on the first occurrence.

use crate::error::{CloudError, Result};
use crate::provider::{Resource, StackProvider, StackStatus};
use crate::terminal::Sleeper;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff parameters shared by every stack
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    /// Delay after the first in-progress answer
    pub min_interval: Duration,

    /// Upper bound for the delay
    pub max_interval: Duration,

    /// Growth factor applied after every sleep
    pub backoff_rate: f64,

    /// Total number of status queries allowed
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(10),
            backoff_rate: 1.1,
            max_attempts: 200,
        }
    }
}

impl PollSettings {
    /// Bind the settings to a concrete stack
    pub fn for_stack(
        &self,
        stack_name: impl Into<String>,
        region: impl Into<String>,
    ) -> PollConfig {
        PollConfig {
            stack_name: stack_name.into(),
            region: region.into(),
            settings: self.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(CloudError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if !(self.backoff_rate > 1.0) || !self.backoff_rate.is_finite() {
            return Err(CloudError::InvalidConfig(format!(
                "backoff_rate must be a finite number greater than 1 (got {})",
                self.backoff_rate
            )));
        }
        if self.min_interval > self.max_interval {
            return Err(CloudError::InvalidConfig(format!(
                "min_interval ({:?}) exceeds max_interval ({:?})",
                self.min_interval, self.max_interval
            )));
        }
        Ok(())
    }
}

/// Configuration of one polling session
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub stack_name: String,
    pub region: String,
    pub settings: PollSettings,
}

/// How a polling session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollOutcome {
    Success,
    Fail,
    Rollback,
    /// The stack was still in progress when the attempt budget ran out
    Exhausted,
}

/// Sleep intervals between polls: `min`, `min * rate`, ... capped at `max`
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    max: Duration,
    rate: f64,
}

impl Backoff {
    pub fn new(settings: &PollSettings) -> Self {
        Self {
            next: settings.min_interval,
            max: settings.max_interval,
            rate: settings.backoff_rate,
        }
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        // Clamp in f64; a huge rate would overflow Duration.
        let next = current.as_secs_f64() * self.rate;
        self.next = if next >= self.max.as_secs_f64() {
            self.max
        } else {
            Duration::from_secs_f64(next)
        };
        Some(current)
    }
}

/// Poll the stack status until it is terminal or the budget is spent
///
/// `on_progress` runs once for every response that carries a resource list,
/// before that response's status is evaluated.
pub async fn poll<P, S, F>(
    provider: &P,
    sleeper: &S,
    config: &PollConfig,
    mut on_progress: F,
) -> Result<PollOutcome>
where
    P: StackProvider + ?Sized,
    S: Sleeper + ?Sized,
    F: FnMut(&[Resource]),
{
    let settings = &config.settings;
    settings.validate()?;

    let mut backoff = Backoff::new(settings);
    let mut attempt: u32 = 1;

    loop {
        tracing::debug!(
            "Polling {} in {} (attempt {}/{})",
            config.stack_name,
            config.region,
            attempt,
            settings.max_attempts
        );

        let response = provider
            .query_status(&config.stack_name, &config.region)
            .await?;

        if let Some(resources) = &response.resources {
            on_progress(resources);
        }

        match response.status {
            StackStatus::Success => return Ok(PollOutcome::Success),
            StackStatus::Fail => return Ok(PollOutcome::Fail),
            StackStatus::Rollback => return Ok(PollOutcome::Rollback),
            StackStatus::InProgress => {}
        }

        if attempt >= settings.max_attempts {
            tracing::warn!(
                "{} still in progress after {} attempts",
                config.stack_name,
                attempt
            );
            return Ok(PollOutcome::Exhausted);
        }

        let interval = backoff.next().unwrap_or(settings.max_interval);
        sleeper.sleep(interval).await;
        attempt += 1;
    }
}
