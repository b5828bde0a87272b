//! Core AchievementEngine implementation

use super::types::{AchievementAwarded, EvaluationReport};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use podium_core::{Achievement, AchievementId, AwardOutcome, AwardRecord, SportStat};
use podium_repository::{AchievementCatalog, AwardStore, EventPublisher, StatsProvider};
use podium_runtime::CriteriaEvaluator;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Achievement engine
///
/// Holds no mutable state: every call to [`evaluate_for_user`] is a complete,
/// independent pass over snapshots fetched from the collaborators. The engine
/// is shared across tasks as `Arc<AchievementEngine>`; double awards under
/// concurrent passes are prevented by the award store alone.
///
/// [`evaluate_for_user`]: AchievementEngine::evaluate_for_user
pub struct AchievementEngine {
    config: EngineConfig,
    catalog: Arc<dyn AchievementCatalog>,
    stats: Arc<dyn StatsProvider>,
    awards: Arc<dyn AwardStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl AchievementEngine {
    /// Create an engine from its collaborators
    pub fn new(
        config: EngineConfig,
        catalog: Arc<dyn AchievementCatalog>,
        stats: Arc<dyn StatsProvider>,
        awards: Arc<dyn AwardStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            catalog,
            stats,
            awards,
            publisher,
        }
    }

    /// Get engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every unearned achievement for a user and award the ones
    /// whose criteria hold
    ///
    /// Returns only the achievements newly awarded by this call. With a
    /// `sport_hint` the catalog is narrowed to achievements of that sport or
    /// of all sports; stats are always loaded in full.
    pub async fn evaluate_for_user(
        &self,
        user_id: &str,
        sport_hint: Option<&str>,
    ) -> Result<Vec<Achievement>> {
        let report = self.evaluate_for_user_with_report(user_id, sport_hint).await?;
        Ok(report.awarded)
    }

    /// Same as [`evaluate_for_user`](Self::evaluate_for_user), returning the
    /// full pass report
    pub async fn evaluate_for_user_with_report(
        &self,
        user_id: &str,
        sport_hint: Option<&str>,
    ) -> Result<EvaluationReport> {
        let start = Instant::now();
        let mut report = EvaluationReport::new(user_id);

        // Every read happens before the first write
        let earned = self
            .awards
            .list_earned_ids(user_id)
            .await
            .map_err(SdkError::AwardsUnavailable)?;

        let catalog = self
            .catalog
            .list(sport_hint)
            .await
            .map_err(SdkError::CatalogUnavailable)?;

        let stats = self
            .stats
            .aggregated_stats(user_id)
            .await
            .map_err(SdkError::StatsUnavailable)?;

        report.candidates = catalog.len();
        report.already_earned = catalog.iter().filter(|a| earned.contains(&a.id)).count();

        tracing::debug!(
            user_id,
            sport_hint,
            candidates = report.candidates,
            already_earned = report.already_earned,
            records = stats.len(),
            "evaluating achievements"
        );

        let qualified = Self::qualifying(&catalog, &earned, &stats);
        report.qualified = qualified.iter().map(|a| a.id.clone()).collect();

        for achievement in qualified {
            let outcome = self
                .awards
                .award(user_id, &achievement.id)
                .await
                .map_err(|source| SdkError::Persistence {
                    achievement_id: achievement.id.clone(),
                    source,
                })?;

            match outcome {
                AwardOutcome::Awarded(record) => {
                    tracing::info!(
                        user_id,
                        achievement_id = %achievement.id,
                        points = achievement.points,
                        "achievement awarded"
                    );
                    self.publish_award(achievement, &record).await;
                    report.awarded.push(achievement.clone());
                }
                AwardOutcome::AlreadyAwarded => {
                    tracing::debug!(
                        user_id,
                        achievement_id = %achievement.id,
                        "achievement awarded by a concurrent pass"
                    );
                    report.raced.push(achievement.id.clone());
                }
            }
        }

        report.duration = start.elapsed();

        tracing::info!(
            user_id,
            candidates = report.candidates,
            awarded = report.awarded.len(),
            raced = report.raced.len(),
            elapsed_ms = report.duration.as_millis() as u64,
            "achievement pass complete"
        );

        Ok(report)
    }

    /// Achievements from `catalog` that are not in `earned` and whose
    /// criteria hold for `stats`, in catalog order
    pub fn qualifying<'a>(
        catalog: &'a [Achievement],
        earned: &HashSet<AchievementId>,
        stats: &[SportStat],
    ) -> Vec<&'a Achievement> {
        catalog
            .iter()
            .filter(|achievement| !earned.contains(&achievement.id))
            .filter(|achievement| {
                let result =
                    CriteriaEvaluator::evaluate(&achievement.criteria, stats, &achievement.sport);
                tracing::debug!(achievement_id = %achievement.id, result, "criteria evaluated");
                result
            })
            .collect()
    }

    /// Publish an award notification
    ///
    /// The award is already committed, so a delivery failure is only logged.
    async fn publish_award(&self, achievement: &Achievement, record: &AwardRecord) {
        if !self.config.publish_events {
            return;
        }

        let payload = match serde_json::to_value(AchievementAwarded::new(achievement, record)) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(achievement_id = %achievement.id, error = %e, "failed to encode award event");
                return;
            }
        };

        if let Err(e) = self.publisher.publish(&self.config.publish_topic, payload).await {
            tracing::warn!(
                user_id = %record.user_id,
                achievement_id = %achievement.id,
                topic = %self.config.publish_topic,
                error = %e,
                "failed to publish award event"
            );
        }
    }
}
