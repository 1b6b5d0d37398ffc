//! What to hit, how hard, and for how long.

use std::str::FromStr;
use std::time::Duration;

use crate::bench::BenchError;

/// A named URL under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
}

impl Target {
    /// Parse `name=url`, or a bare URL (named after its position later).
    pub fn parse(input: &str) -> Result<Self, BenchError> {
        let (name, url) = match input.split_once('=') {
            Some((name, url)) if !name.contains("://") => (name.trim(), url.trim()),
            _ => ("", input.trim()),
        };
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BenchError::InvalidTarget(input.to_string()));
        }
        let name = if name.is_empty() { url } else { name };
        Ok(Self {
            name: name.to_string(),
            url: url.to_string(),
        })
    }
}

impl FromStr for Target {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A period with a fixed number of concurrent virtual users.
///
/// Stages form a step profile: all users start together and hold until the
/// deadline; there is no linear ramp between stages. A user's iteration in
/// flight at the deadline finishes first, so a stage can overrun by up to one
/// iteration plus the think time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub users: usize,
}

impl Stage {
    /// Parse `<duration>:<users>`, e.g. `30s:100`.
    pub fn parse(input: &str) -> Result<Self, BenchError> {
        let (duration, users) = input
            .split_once(':')
            .ok_or_else(|| BenchError::InvalidStage(input.to_string()))?;
        let duration = parse_duration(duration.trim())
            .map_err(|_| BenchError::InvalidStage(input.to_string()))?;
        let users = users
            .trim()
            .parse()
            .map_err(|_| BenchError::InvalidStage(input.to_string()))?;
        Ok(Self { duration, users })
    }
}

impl FromStr for Stage {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse `500ms`, `30s`, `2m` or a bare number of seconds.
pub fn parse_duration(input: &str) -> Result<Duration, BenchError> {
    let invalid = || BenchError::InvalidDuration(input.to_string());

    let (digits, unit) = match input.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => input.split_at(idx),
        None => (input, "s"),
    };
    let value: u64 = digits.parse().map_err(|_| invalid())?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value.checked_mul(60).ok_or_else(invalid)?)),
        _ => Err(invalid()),
    }
}

/// A complete load-test description.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub targets: Vec<Target>,
    pub stages: Vec<Stage>,
    /// Pause after each iteration over all targets.
    pub think_time: Duration,
    /// Calls slower than this count as failures.
    pub slo: Duration,
}

impl LoadPlan {
    /// Sum of all stage durations.
    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Highest concurrency of any stage.
    pub fn peak_users(&self) -> usize {
        self.stages.iter().map(|s| s.users).max().unwrap_or(0)
    }
}
