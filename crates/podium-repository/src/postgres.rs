//! PostgreSQL backed collaborators
//!
//! A single [`PostgresStore`] serves the catalog, stats and award traits
//! over the tables in `migrations/0001_achievements.sql`. The award insert
//! relies on the `(user_id, achievement_id)` unique constraint, so it is safe
//! under concurrent passes across processes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use podium_core::{
    Achievement, AchievementId, AwardOutcome, AwardRecord, Rarity, SportScope, SportStat, UserId,
};
use podium_parser::{CriteriaParser, ParseMode};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use std::collections::{HashMap, HashSet};

use crate::traits::{AchievementCatalog, AwardStore, StatsProvider};
use crate::RepositoryResult;

const SCHEMA: &str = include_str!("../migrations/0001_achievements.sql");

/// PostgreSQL store
pub struct PostgresStore {
    /// Database connection pool
    pool: PgPool,
    /// How stored criteria are parsed
    mode: ParseMode,
}

impl PostgresStore {
    /// Connect to PostgreSQL
    ///
    /// Stored criteria are parsed leniently: a malformed row evaluates as
    /// false instead of failing the whole catalog.
    ///
    /// # Example
    /// ```no_run
    /// use podium_repository::PostgresStore;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let store = PostgresStore::new("postgresql://localhost/podium").await?;
    ///     store.migrate().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(database_url: &str) -> RepositoryResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::with_pool(pool))
    }

    /// Create a store with an existing pool
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            pool,
            mode: ParseMode::Lenient,
        }
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables if they do not exist
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Users that have at least one stat record
    pub async fn list_user_ids(&self) -> RepositoryResult<Vec<UserId>> {
        let rows = sqlx::query("SELECT DISTINCT user_id FROM sport_stats ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("user_id").map_err(Into::into))
            .collect()
    }

    /// Insert or replace a catalog entry
    pub async fn upsert_achievement(&self, achievement: &Achievement) -> RepositoryResult<()> {
        let criteria = serde_json::to_value(&achievement.criteria)?;

        sqlx::query(
            "INSERT INTO achievements (id, name, description, category, sport, criteria, rarity, points)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                sport = EXCLUDED.sport,
                criteria = EXCLUDED.criteria,
                rarity = EXCLUDED.rarity,
                points = EXCLUDED.points",
        )
        .bind(&achievement.id)
        .bind(&achievement.name)
        .bind(&achievement.description)
        .bind(&achievement.category)
        .bind(achievement.sport.as_str())
        .bind(Json(criteria))
        .bind(achievement.rarity.to_string())
        .bind(achievement.points)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a stat record
    pub async fn upsert_stat(&self, stat: &SportStat) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO sport_stats
                (user_id, sport, matches_played, wins, losses, draws, goals_scored, assists, elo, streak, extra, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
             ON CONFLICT (user_id, sport) DO UPDATE SET
                matches_played = EXCLUDED.matches_played,
                wins = EXCLUDED.wins,
                losses = EXCLUDED.losses,
                draws = EXCLUDED.draws,
                goals_scored = EXCLUDED.goals_scored,
                assists = EXCLUDED.assists,
                elo = EXCLUDED.elo,
                streak = EXCLUDED.streak,
                extra = EXCLUDED.extra,
                updated_at = NOW()",
        )
        .bind(&stat.user_id)
        .bind(&stat.sport)
        .bind(stat.matches_played)
        .bind(stat.wins)
        .bind(stat.losses)
        .bind(stat.draws)
        .bind(stat.goals_scored)
        .bind(stat.assists)
        .bind(stat.elo)
        .bind(stat.streak)
        .bind(Json(&stat.extra))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_achievement(&self, row: &PgRow) -> RepositoryResult<Achievement> {
        let id: String = row.try_get("id")?;
        let sport: String = row.try_get("sport")?;
        let rarity: String = row.try_get("rarity")?;
        let Json(criteria): Json<serde_json::Value> = row.try_get("criteria")?;

        let rarity = rarity.parse::<Rarity>().unwrap_or_else(|e| {
            tracing::warn!(achievement_id = %id, error = %e, "unknown rarity, using common");
            Rarity::default()
        });

        Ok(Achievement {
            criteria: CriteriaParser::parse_json(&criteria, self.mode)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            sport: SportScope::from_sport(Some(&sport)),
            rarity,
            points: row.try_get("points")?,
            id,
        })
    }
}

fn row_to_stat(row: &PgRow) -> RepositoryResult<SportStat> {
    let Json(extra): Json<HashMap<String, f64>> = row.try_get("extra")?;

    Ok(SportStat {
        user_id: row.try_get("user_id")?,
        sport: row.try_get("sport")?,
        matches_played: row.try_get("matches_played")?,
        wins: row.try_get("wins")?,
        losses: row.try_get("losses")?,
        draws: row.try_get("draws")?,
        goals_scored: row.try_get("goals_scored")?,
        assists: row.try_get("assists")?,
        elo: row.try_get("elo")?,
        streak: row.try_get("streak")?,
        extra,
    })
}

#[async_trait]
impl AchievementCatalog for PostgresStore {
    async fn list(&self, sport_filter: Option<&str>) -> RepositoryResult<Vec<Achievement>> {
        let sport_filter = match SportScope::from_sport(sport_filter) {
            SportScope::All => None,
            SportScope::Sport(sport) => Some(sport),
        };

        let rows = sqlx::query(
            "SELECT id, name, description, category, sport, criteria, rarity, points
             FROM achievements
             WHERE $1::TEXT IS NULL
                OR sport = ''
                OR LOWER(sport) = 'all'
                OR LOWER(sport) = LOWER($1)
             ORDER BY created_at, id",
        )
        .bind(sport_filter)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| self.row_to_achievement(row)).collect()
    }
}

#[async_trait]
impl StatsProvider for PostgresStore {
    async fn aggregated_stats(&self, user_id: &str) -> RepositoryResult<Vec<SportStat>> {
        let rows = sqlx::query(
            "SELECT user_id, sport, matches_played, wins, losses, draws, goals_scored, assists, elo, streak, extra
             FROM sport_stats
             WHERE user_id = $1
             ORDER BY sport",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_stat).collect()
    }
}

#[async_trait]
impl AwardStore for PostgresStore {
    async fn list_earned_ids(&self, user_id: &str) -> RepositoryResult<HashSet<AchievementId>> {
        let rows = sqlx::query("SELECT achievement_id FROM user_achievements WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("achievement_id").map_err(Into::into))
            .collect()
    }

    async fn award(&self, user_id: &str, achievement_id: &str) -> RepositoryResult<AwardOutcome> {
        let row = sqlx::query(
            "INSERT INTO user_achievements (user_id, achievement_id, earned_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (user_id, achievement_id) DO NOTHING
             RETURNING earned_at",
        )
        .bind(user_id)
        .bind(achievement_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let earned_at: DateTime<Utc> = row.try_get("earned_at")?;
                Ok(AwardOutcome::Awarded(AwardRecord {
                    user_id: user_id.to_string(),
                    achievement_id: achievement_id.to_string(),
                    earned_at,
                }))
            }
            None => {
                tracing::debug!(user_id, achievement_id, "award already recorded");
                Ok(AwardOutcome::AlreadyAwarded)
            }
        }
    }
}
