use chrono::{Local, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::message::{format_check_time, format_error_message, format_exam_message};
use crate::api::{build_request_url, ExamSource, FetchError};
use crate::core::config::ExamApiConfig;
use crate::notify::Notifier;

/// What a single `check_for_exams` call did.
#[derive(Debug)]
pub enum PollOutcome {
    /// Another check was still in flight.
    Skipped,
    Found(usize),
    Empty,
    Failed(FetchError),
}

/// Runs poll cycles against the exam API, never more than one at a time.
pub struct ExamChecker {
    config: ExamApiConfig,
    source: Arc<dyn ExamSource>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

/// Releases the in-flight flag on every exit path, including cancellation.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExamChecker {
    pub fn new(
        config: ExamApiConfig,
        source: Arc<dyn ExamSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            source,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    pub async fn check_for_exams(&self) -> PollOutcome {
        let Some(_guard) = self.try_begin() else {
            tracing::info!("⏳ Previous check still running, skipping...");
            return PollOutcome::Skipped;
        };

        tracing::info!(
            "🔍 Checking for exams at {}",
            format_check_time(Local::now().naive_local())
        );

        let url = build_request_url(&self.config, Utc::now().timestamp_millis());
        tracing::info!(url = %url, "📡 Querying exam API");

        match self.source.fetch_exams(&url).await {
            Ok(response) => {
                let total_count = response.total_count();
                let exams = response.into_exams();
                tracing::info!(
                    total_count,
                    exams = exams.len(),
                    "📊 API response received"
                );

                if exams.is_empty() {
                    tracing::info!("ℹ️ No exams found");
                    return PollOutcome::Empty;
                }

                tracing::info!(count = exams.len(), "🎯 Found exam(s)!");
                let message = format_exam_message(&exams, Local::now().naive_local());
                self.notifier.notify(&message).await;
                PollOutcome::Found(exams.len())
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "❌ Error checking for exams");

                if e.is_connectivity() {
                    let alert = format_error_message(&e.message(), Local::now().naive_local());
                    self.notifier.notify(&alert).await;
                }
                PollOutcome::Failed(e)
            }
        }
    }
}
