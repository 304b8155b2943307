use std::sync::Arc;
use tokio::time::{self, Duration, MissedTickBehavior};

use super::exam_checker::ExamChecker;

/// Fires the exam check once at startup and then on a fixed cadence.
pub struct Scheduler {
    checker: Arc<ExamChecker>,
    period: Duration,
}

impl Scheduler {
    pub fn new(checker: Arc<ExamChecker>, interval_minutes: u64) -> Self {
        Self::with_period(checker, Duration::from_secs(interval_minutes.saturating_mul(60)))
    }

    pub fn with_period(checker: Arc<ExamChecker>, period: Duration) -> Self {
        Self { checker, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Never returns. Each tick spawns its own cycle, so a slow request does
    /// not push later ticks back; overlapping cycles are rejected by the checker.
    pub async fn run(self) {
        tracing::info!(
            "📅 Checking every {} minute(s), first check now",
            self.period.as_secs() / 60
        );

        // The first tick completes immediately.
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let checker = self.checker.clone();
            tokio::spawn(async move {
                checker.check_for_exams().await;
            });
        }
    }
}
