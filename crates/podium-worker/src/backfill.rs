//! Backfill: run an evaluation pass for many users

use futures::stream::{self, StreamExt};
use podium_core::UserId;
use podium_sdk::AchievementEngine;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A user whose pass failed
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillFailure {
    pub user_id: UserId,
    pub error: String,
}

/// Totals across a backfill run
#[derive(Debug, Clone, Default)]
pub struct BackfillSummary {
    pub users: usize,
    pub awarded: usize,
    pub points: i64,
    pub failures: Vec<BackfillFailure>,
    pub duration: Duration,
}

impl BackfillSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluate every user, at most `concurrency` at a time
///
/// A failed pass is recorded and the run continues with the next user.
pub async fn run_backfill(
    engine: Arc<AchievementEngine>,
    user_ids: Vec<UserId>,
    sport_hint: Option<String>,
    concurrency: usize,
) -> BackfillSummary {
    let start = Instant::now();
    let mut summary = BackfillSummary {
        users: user_ids.len(),
        ..Default::default()
    };

    let mut passes = stream::iter(user_ids)
        .map(|user_id| {
            let engine = Arc::clone(&engine);
            let sport_hint = sport_hint.clone();
            async move {
                let result = engine
                    .evaluate_for_user_with_report(&user_id, sport_hint.as_deref())
                    .await;
                (user_id, result)
            }
        })
        .buffer_unordered(concurrency.max(1));

    while let Some((user_id, result)) = passes.next().await {
        match result {
            Ok(report) => {
                summary.awarded += report.awarded.len();
                summary.points += report.points();
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "evaluation pass failed");
                summary.failures.push(BackfillFailure {
                    user_id,
                    error: e.to_string(),
                });
            }
        }
    }

    summary.duration = start.elapsed();
    summary
}
