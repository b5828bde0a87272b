//! Load-time catalog inspection

use podium_core::Achievement;

/// Log the shape of freshly loaded catalog entries
///
/// Entries with malformed criteria are reported at warn level since they
/// can never be awarded.
pub(crate) fn inspect_catalog(source: &str, achievements: &[Achievement]) {
    for achievement in achievements {
        if !achievement.criteria.is_well_formed() {
            tracing::warn!(
                source,
                achievement_id = %achievement.id,
                "criteria contains malformed nodes, achievement can never be awarded"
            );
        }

        let fields: Vec<&str> = achievement
            .criteria
            .referenced_fields()
            .into_iter()
            .map(|field| field.name())
            .collect();

        tracing::debug!(
            source,
            achievement_id = %achievement.id,
            depth = achievement.criteria.depth(),
            fields = ?fields,
            "catalog entry loaded"
        );
    }
}
