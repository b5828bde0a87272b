//! Criteria evaluation
//!
//! Evaluates a [`Criteria`] tree against a user's per-sport stat records.
//!
//! # Semantics
//!
//! - Records are narrowed to the achievement's sport scope once, at the top
//!   level. Composite children reuse the narrowed set.
//! - `stat_threshold`, `ratio` and `streak` hold if **any** single in-scope
//!   record satisfies them.
//! - `stat_total` sums the field over all in-scope records (absent = 0).
//! - A ratio over a record whose denominator is zero never holds.
//! - Malformed nodes evaluate to false and are logged at warn level.

mod comparison;


pub use comparison::EPSILON;

use crate::error::{Result, RuntimeError};
use comparison::execute_compare;
use podium_core::{CompositeLogic, Criteria, SportScope, SportStat, StatField, StreakType};

/// Pure, synchronous criteria evaluator
pub struct CriteriaEvaluator;

impl CriteriaEvaluator {
    /// Evaluate a criteria tree for one achievement
    ///
    /// `scope` is the owning achievement's sport scope.
    pub fn evaluate(criteria: &Criteria, stats: &[SportStat], scope: &SportScope) -> bool {
        let records = Self::filter_in_scope(stats, scope);
        Self::evaluate_records(criteria, &records)
    }

    /// Narrow stat records to a sport scope
    pub fn filter_in_scope<'a>(stats: &'a [SportStat], scope: &SportScope) -> Vec<&'a SportStat> {
        stats.iter().filter(|stat| scope.includes(&stat.sport)).collect()
    }

    /// Evaluate a node against records that are already in scope.
    ///
    /// Never fails: a node that cannot be evaluated is false.
    pub fn evaluate_records(criteria: &Criteria, records: &[&SportStat]) -> bool {
        match Self::try_evaluate(criteria, records) {
            Ok(result) => {
                tracing::trace!(kind = criteria.kind(), result, "criteria node evaluated");
                result
            }
            Err(e) => {
                tracing::warn!(kind = criteria.kind(), error = %e, "criteria node evaluated as false");
                false
            }
        }
    }

    /// Evaluate a node, reporting why it could not be evaluated
    pub fn try_evaluate(criteria: &Criteria, records: &[&SportStat]) -> Result<bool> {
        match criteria {
            Criteria::StatThreshold {
                field,
                operator,
                value,
            } => Ok(records.iter().any(|record| match record.get(field) {
                Some(actual) => execute_compare(actual, *operator, *value),
                None => false,
            })),

            Criteria::StatTotal {
                field,
                operator,
                value,
            } => {
                let total: f64 = records
                    .iter()
                    .map(|record| record.get(field).unwrap_or(0.0))
                    .sum();
                Ok(execute_compare(total, *operator, *value))
            }

            Criteria::Ratio {
                numerator,
                denominator,
                operator,
                value,
            } => Ok(records.iter().any(|record| {
                match Self::record_ratio(record, numerator, denominator) {
                    Ok(ratio) => execute_compare(ratio, *operator, *value),
                    Err(e) => {
                        tracing::debug!(sport = %record.sport, error = %e, "record skipped for ratio");
                        false
                    }
                }
            })),

            Criteria::Streak {
                streak_type,
                operator,
                value,
            } => Ok(records.iter().any(|record| {
                match Self::streak_length(record.streak, *streak_type) {
                    Some(length) => execute_compare(length, *operator, *value),
                    None => false,
                }
            })),

            Criteria::Composite { logic, conditions } => Ok(match logic {
                CompositeLogic::And => conditions
                    .iter()
                    .all(|condition| Self::evaluate_records(condition, records)),
                CompositeLogic::Or => conditions
                    .iter()
                    .any(|condition| Self::evaluate_records(condition, records)),
            }),

            Criteria::Invalid { kind, reason } => Err(RuntimeError::MalformedCriteria {
                kind: kind.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// `numerator / denominator` for a single record
    fn record_ratio(record: &SportStat, numerator: &StatField, denominator: &StatField) -> Result<f64> {
        let bottom = record
            .get(denominator)
            .ok_or_else(|| RuntimeError::FieldNotFound(denominator.name().to_string()))?;
        if bottom == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }

        let top = record
            .get(numerator)
            .ok_or_else(|| RuntimeError::FieldNotFound(numerator.name().to_string()))?;

        Ok(top / bottom)
    }

    /// The run length a streak condition compares, or `None` when the sign excludes the record
    pub fn streak_length(streak: i32, streak_type: StreakType) -> Option<f64> {
        let magnitude = f64::from(streak).abs();
        match streak_type {
            StreakType::Winning if streak > 0 => Some(magnitude),
            StreakType::Losing if streak < 0 => Some(magnitude),
            StreakType::Any => Some(magnitude),
            StreakType::Winning | StreakType::Losing => None,
        }
    }
}
