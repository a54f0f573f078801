//! Database repository for CRUD operations.
//!
//! User and topic operations live here; flat resources and the course
//! aggregate are implemented in sibling modules on the same `Repository`.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Topic, UpdateTopicRequest, User};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: SqlitePool,
}

/// Current wall-clock time in epoch milliseconds, the unit used by every
/// `last_active` column.
pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Clamp pagination parameters and derive the SQL offset. Pages below 1 are
/// treated as page 1 so the offset can never go negative. An `itemsPerPage`
/// of 0 passes through as `LIMIT 0`, yielding an empty page.
pub(crate) fn page_offset(page: i64, items_per_page: i64) -> (i64, i64) {
    let limit = items_per_page.max(0);
    let offset = (page.max(1) - 1) * limit;
    (limit, offset)
}

/// Map a unique-index violation on `(user_id, title)` to the same Conflict
/// the pre-insert title check surfaces, so losing the create race (or
/// renaming onto an existing title) never leaks a raw database error.
fn topic_title_conflict(err: sqlx::Error) -> AppError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        AppError::Conflict("This topic already exists!".to_string())
    } else {
        err.into()
    }
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Create a new user. The password must already be hashed.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let result = sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            password: password_hash.to_string(),
        })
    }

    /// Find a user by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, email, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Find a user by id.
    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, email, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    // ==================== TOPIC OPERATIONS ====================

    /// List all topics owned by a user, most recently active first.
    pub async fn list_topics(&self, user_id: i64) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, user_id, last_active FROM topics WHERE user_id = ? ORDER BY last_active DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(topic_from_row).collect())
    }

    /// Find a user's topic by exact title. Backs the duplicate-title check
    /// before creation.
    pub async fn find_topic_by_title(
        &self,
        user_id: i64,
        title: &str,
    ) -> Result<Option<Topic>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, user_id, last_active FROM topics WHERE user_id = ? AND title = ?",
        )
        .bind(user_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(topic_from_row))
    }

    /// Get a topic by id.
    pub async fn find_topic_by_id(&self, id: i64) -> Result<Option<Topic>, AppError> {
        let row = sqlx::query("SELECT id, title, user_id, last_active FROM topics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(topic_from_row))
    }

    /// Create a new topic for a user.
    pub async fn create_topic(&self, title: &str, user_id: i64) -> Result<Topic, AppError> {
        let last_active = now_ms();
        let result = sqlx::query("INSERT INTO topics (title, user_id, last_active) VALUES (?, ?, ?)")
            .bind(title)
            .bind(user_id)
            .bind(last_active)
            .execute(&self.pool)
            .await
            .map_err(topic_title_conflict)?;

        Ok(Topic {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            user_id,
            last_active,
        })
    }

    /// Update a topic, merging only the fields present in the request.
    pub async fn update_topic(
        &self,
        existing: &Topic,
        request: &UpdateTopicRequest,
    ) -> Result<Topic, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let last_active = request.last_active.unwrap_or(existing.last_active);

        sqlx::query("UPDATE topics SET title = ?, last_active = ? WHERE id = ?")
            .bind(title)
            .bind(last_active)
            .bind(existing.id)
            .execute(&self.pool)
            .await
            .map_err(topic_title_conflict)?;

        Ok(Topic {
            id: existing.id,
            title: title.clone(),
            user_id: existing.user_id,
            last_active,
        })
    }

    /// Delete a topic. All attached resources (articles, PDFs, YouTube links,
    /// courses with their sections and videos) go with it via cascade.
    pub async fn delete_topic(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password: row.get("password"),
    }
}

fn topic_from_row(row: &sqlx::sqlite::SqliteRow) -> Topic {
    Topic {
        id: row.get("id"),
        title: row.get("title"),
        user_id: row.get("user_id"),
        last_active: row.get("last_active"),
    }
}
