//! Summaries, comparison and pass/fail thresholds.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::bench::plan::LoadPlan;
use crate::bench::runner::{RunOutcome, Sample};
use crate::bench::BenchError;

/// Pass/fail limits applied to a finished run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Thresholds {
    /// Overall p95 latency must stay below this.
    pub p95_limit_ms: f64,
    /// Every target's success rate must exceed this.
    pub min_success_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            p95_limit_ms: 3000.0,
            min_success_rate: 0.95,
        }
    }
}

/// Latency and success statistics for one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetSummary {
    pub name: String,
    pub url: String,
    pub requests: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub avg_ms: f64,
    pub med_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl TargetSummary {
    fn from_samples<'a>(name: &str, url: &str, samples: impl Iterator<Item = &'a Sample>) -> Self {
        let mut latencies = Vec::new();
        let mut successes = 0;
        for sample in samples {
            latencies.push(sample.latency.as_micros() as f64 / 1000.0);
            if sample.ok {
                successes += 1;
            }
        }
        latencies.sort_by(f64::total_cmp);

        let requests = latencies.len();
        let avg_ms = if requests == 0 {
            0.0
        } else {
            latencies.iter().sum::<f64>() / requests as f64
        };

        Self {
            name: name.to_string(),
            url: url.to_string(),
            requests,
            successes,
            success_rate: if requests == 0 {
                0.0
            } else {
                successes as f64 / requests as f64
            },
            avg_ms,
            med_ms: percentile(&latencies, 50.0),
            p95_ms: percentile(&latencies, 95.0),
            p99_ms: percentile(&latencies, 99.0),
            min_ms: latencies.first().copied().unwrap_or(0.0),
            max_ms: latencies.last().copied().unwrap_or(0.0),
        }
    }
}

/// Nearest-rank percentile of an ascending slice. Empty input yields 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// First target versus second.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub baseline: String,
    pub candidate: String,
    /// `(candidate - baseline) / baseline`, in percent.
    pub avg_diff_pct: f64,
    pub p95_diff_pct: f64,
    /// Name of the target with the lower average latency.
    pub faster: String,
}

impl Comparison {
    fn between(baseline: &TargetSummary, candidate: &TargetSummary) -> Option<Self> {
        if baseline.requests == 0 || candidate.requests == 0 || baseline.avg_ms <= 0.0 {
            return None;
        }
        let p95_diff_pct = if baseline.p95_ms > 0.0 {
            (candidate.p95_ms - baseline.p95_ms) / baseline.p95_ms * 100.0
        } else {
            0.0
        };
        let faster = if baseline.avg_ms <= candidate.avg_ms {
            &baseline.name
        } else {
            &candidate.name
        };
        Some(Self {
            baseline: baseline.name.clone(),
            candidate: candidate.name.clone(),
            avg_diff_pct: (candidate.avg_ms - baseline.avg_ms) / baseline.avg_ms * 100.0,
            p95_diff_pct,
            faster: faster.clone(),
        })
    }
}

/// Outcome of one threshold check.
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// The full run summary.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_requests: usize,
    pub duration_secs: f64,
    /// p95 across all targets.
    pub p95_ms: f64,
    pub targets: Vec<TargetSummary>,
    pub comparison: Option<Comparison>,
    pub thresholds: Vec<ThresholdResult>,
}

impl Report {
    pub fn build(plan: &LoadPlan, outcome: &RunOutcome, thresholds: Thresholds) -> Self {
        let targets: Vec<TargetSummary> = plan
            .targets
            .iter()
            .enumerate()
            .map(|(idx, target)| {
                TargetSummary::from_samples(
                    &target.name,
                    &target.url,
                    outcome.samples.iter().filter(|s| s.target == idx),
                )
            })
            .collect();

        let overall = TargetSummary::from_samples("all", "", outcome.samples.iter());

        let comparison = match targets.as_slice() {
            [baseline, candidate, ..] => Comparison::between(baseline, candidate),
            _ => None,
        };

        let mut checks = vec![ThresholdResult {
            name: "p95".to_string(),
            passed: overall.requests > 0 && overall.p95_ms < thresholds.p95_limit_ms,
            detail: format!("p(95)={:.2}ms < {:.0}ms", overall.p95_ms, thresholds.p95_limit_ms),
        }];
        for summary in &targets {
            checks.push(ThresholdResult {
                name: format!("{} success rate", summary.name),
                passed: summary.success_rate > thresholds.min_success_rate,
                detail: format!(
                    "rate={:.2}% > {:.0}%",
                    summary.success_rate * 100.0,
                    thresholds.min_success_rate * 100.0
                ),
            });
        }

        Self {
            total_requests: overall.requests,
            duration_secs: outcome.elapsed.as_secs_f64(),
            p95_ms: overall.p95_ms,
            targets,
            comparison,
            thresholds: checks,
        }
    }

    /// True when every threshold held.
    pub fn passed(&self) -> bool {
        self.thresholds.iter().all(|t| t.passed)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "-".repeat(64);

        let _ = writeln!(out, "\n=== Load test report ===\n");
        let _ = writeln!(out, "Total requests: {}", self.total_requests);
        let _ = writeln!(out, "Duration:       {:.2}s", self.duration_secs);

        for t in &self.targets {
            let _ = writeln!(out, "\n{} ({})\n{}", t.name, t.url, rule);
            let _ = writeln!(out, "Success rate: {:.2}% ({}/{})", t.success_rate * 100.0, t.successes, t.requests);
            let _ = writeln!(out, "Average:      {:.2}ms", t.avg_ms);
            let _ = writeln!(out, "Median:       {:.2}ms", t.med_ms);
            let _ = writeln!(out, "P95:          {:.2}ms", t.p95_ms);
            let _ = writeln!(out, "P99:          {:.2}ms", t.p99_ms);
            let _ = writeln!(out, "Min:          {:.2}ms", t.min_ms);
            let _ = writeln!(out, "Max:          {:.2}ms", t.max_ms);
        }

        if let Some(c) = &self.comparison {
            let _ = writeln!(out, "\n{} vs {}\n{}", c.baseline, c.candidate, rule);
            let _ = writeln!(out, "Average latency difference: {:+.2}%", c.avg_diff_pct);
            let _ = writeln!(out, "P95 latency difference:     {:+.2}%", c.p95_diff_pct);
            let _ = writeln!(out, "Faster on average:          {}", c.faster);
        }

        let _ = writeln!(out, "\nThresholds\n{}", rule);
        for t in &self.thresholds {
            let mark = if t.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "[{}] {}: {}", mark, t.name, t.detail);
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<(), BenchError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
