//! Course aggregate operations.
//!
//! A course owns ordered sections, each owning ordered videos. The whole tree
//! is written in one transaction and reconstructed on read, at which point the
//! next-URL map and watched-URL list are derived in memory. Neither derived
//! field is ever written back.

use std::collections::HashMap;

use sqlx::Row;

use super::repository::{now_ms, page_offset, Repository};
use crate::errors::AppError;
use crate::models::{
    AddSectionsRequest, Course, CourseTree, CreateCourseRequest, NewSection, Section, SectionTree,
    UpdateCourseRequest, UpdateSectionRequest, UpdateVideoRequest, Video,
};

impl Repository {
    // ==================== COURSE OPERATIONS ====================

    /// Persist a course with its full section/video tree. The insert runs in
    /// a single transaction, so a failing section or video rolls back the
    /// course row instead of leaving a partial aggregate.
    pub async fn create_course(&self, request: &CreateCourseRequest) -> Result<Course, AppError> {
        let last_active = now_ms();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"INSERT INTO courses (title, topic_id, last_active, last_watched, archived, total_items)
               VALUES (?, ?, ?, 0, 0, ?)"#,
        )
        .bind(&request.title)
        .bind(request.topic_id)
        .bind(last_active)
        .bind(request.total_items)
        .execute(&mut *tx)
        .await?;

        let course_id = result.last_insert_rowid();
        insert_sections(&mut tx, course_id, &request.sections).await?;

        tx.commit().await?;

        Ok(Course {
            id: course_id,
            title: request.title.clone(),
            topic_id: request.topic_id,
            last_active,
            last_watched: 0,
            archived: false,
            total_items: request.total_items,
        })
    }

    /// Append sections (with their videos) to an existing course. Supplied
    /// `order` values are trusted and not checked against existing sections.
    pub async fn add_sections_to_course(
        &self,
        course: &Course,
        request: &AddSectionsRequest,
    ) -> Result<Course, AppError> {
        let total_items = request.total_items.unwrap_or(course.total_items);
        let mut tx = self.pool.begin().await?;

        insert_sections(&mut tx, course.id, &request.sections).await?;

        sqlx::query("UPDATE courses SET total_items = ? WHERE id = ?")
            .bind(total_items)
            .bind(course.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Course {
            total_items,
            ..course.clone()
        })
    }

    /// Get a course row by id, without its tree.
    pub async fn find_course_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, topic_id, last_active, last_watched, archived, total_items
               FROM courses WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(course_from_row))
    }

    /// Reconstruct the full course tree (sections and videos in `order`) and
    /// attach the derived next-URL map and watched-URL list.
    pub async fn find_course_tree(&self, id: i64) -> Result<Option<CourseTree>, AppError> {
        let Some(course) = self.find_course_by_id(id).await? else {
            return Ok(None);
        };

        let section_rows = sqlx::query(
            r#"SELECT id, title, course_id, "order", total_video_length
               FROM sections WHERE course_id = ? ORDER BY "order""#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let video_rows = sqlx::query(
            r#"SELECT v.id, v.title, v.url, v.section_id, v."order", v.duration, v.watched, v.minutes_watched
               FROM videos v JOIN sections s ON v.section_id = s.id
               WHERE s.course_id = ? ORDER BY s."order", v."order""#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut videos_by_section: HashMap<i64, Vec<Video>> = HashMap::new();
        for row in &video_rows {
            let video = video_from_row(row);
            videos_by_section.entry(video.section_id).or_default().push(video);
        }

        let sections: Vec<SectionTree> = section_rows
            .iter()
            .map(|row| {
                let section = section_from_row(row);
                let videos = videos_by_section.remove(&section.id).unwrap_or_default();
                SectionTree { section, videos }
            })
            .collect();

        let (next_urls, watched_videos) = compute_next_urls(&sections);

        Ok(Some(CourseTree {
            course,
            sections,
            next_urls,
            watched_videos,
        }))
    }

    pub async fn list_courses(
        &self,
        topic_id: i64,
        page: i64,
        items_per_page: i64,
        archived: bool,
    ) -> Result<Vec<Course>, AppError> {
        let (limit, offset) = page_offset(page, items_per_page);
        let rows = sqlx::query(
            r#"SELECT id, title, topic_id, last_active, last_watched, archived, total_items
               FROM courses WHERE topic_id = ? AND archived = ?
               ORDER BY last_active DESC LIMIT ? OFFSET ?"#,
        )
        .bind(topic_id)
        .bind(archived as i32)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(course_from_row).collect())
    }

    pub async fn count_courses(&self, topic_id: i64, archived: bool) -> Result<i64, AppError> {
        let row =
            sqlx::query("SELECT COUNT(id) AS count FROM courses WHERE topic_id = ? AND archived = ?")
                .bind(topic_id)
                .bind(archived as i32)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.get("count"))
    }

    /// Update a course: merge `title` and `lastWatched`, always refresh
    /// `lastActive`, and take `archived` from the request as-is (omitted
    /// means false).
    pub async fn update_course(
        &self,
        existing: &Course,
        request: &UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let last_watched = request.last_watched.unwrap_or(existing.last_watched);
        let last_active = now_ms();
        let archived = request.archived;

        sqlx::query(
            "UPDATE courses SET title = ?, last_watched = ?, last_active = ?, archived = ? WHERE id = ?",
        )
        .bind(title)
        .bind(last_watched)
        .bind(last_active)
        .bind(archived as i32)
        .bind(existing.id)
        .execute(&self.pool)
        .await?;

        Ok(Course {
            title: title.clone(),
            last_watched,
            last_active,
            archived,
            ..existing.clone()
        })
    }

    /// Recompute a course's `lastWatched` as the maximum `order` among its
    /// watched videos (0 when none are watched), and refresh `lastActive`.
    /// Videos of other courses never influence the result.
    pub async fn update_last_watched(&self, course: &Course) -> Result<Course, AppError> {
        let row = sqlx::query(
            r#"SELECT MAX(v."order") AS last_watched FROM videos v
               JOIN sections s ON v.section_id = s.id
               WHERE v.watched = 1 AND s.course_id = ?"#,
        )
        .bind(course.id)
        .fetch_one(&self.pool)
        .await?;

        let last_watched: Option<i64> = row.get("last_watched");
        let last_watched = last_watched.unwrap_or(0);
        let last_active = now_ms();

        sqlx::query("UPDATE courses SET last_watched = ?, last_active = ? WHERE id = ?")
            .bind(last_watched)
            .bind(last_active)
            .bind(course.id)
            .execute(&self.pool)
            .await?;

        Ok(Course {
            last_watched,
            last_active,
            ..course.clone()
        })
    }

    /// Delete a course. Sections and videos go with it via cascade.
    pub async fn delete_course(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Course {} not found", id)));
        }

        Ok(())
    }

    // ==================== SECTION / VIDEO OPERATIONS ====================

    pub async fn find_section_by_id(&self, id: i64) -> Result<Option<Section>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, course_id, "order", total_video_length FROM sections WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(section_from_row))
    }

    pub async fn update_section(
        &self,
        existing: &Section,
        request: &UpdateSectionRequest,
    ) -> Result<Section, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);

        sqlx::query("UPDATE sections SET title = ? WHERE id = ?")
            .bind(title)
            .bind(existing.id)
            .execute(&self.pool)
            .await?;

        Ok(Section {
            title: title.clone(),
            ..existing.clone()
        })
    }

    pub async fn find_video_by_id(&self, id: i64) -> Result<Option<Video>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, url, section_id, "order", duration, watched, minutes_watched
               FROM videos WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(video_from_row))
    }

    /// Update a video: merge present fields; `watched` is taken from the
    /// request as-is (omitted means false).
    pub async fn update_video(
        &self,
        existing: &Video,
        request: &UpdateVideoRequest,
    ) -> Result<Video, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let order = request.order.unwrap_or(existing.order);
        let duration = request.duration.clone().or_else(|| existing.duration.clone());
        let minutes_watched = request.minutes_watched.unwrap_or(existing.minutes_watched);
        let watched = request.watched;

        sqlx::query(
            r#"UPDATE videos SET title = ?, "order" = ?, duration = ?, watched = ?, minutes_watched = ?
               WHERE id = ?"#,
        )
        .bind(title)
        .bind(order)
        .bind(&duration)
        .bind(watched as i32)
        .bind(minutes_watched)
        .bind(existing.id)
        .execute(&self.pool)
        .await?;

        Ok(Video {
            title: title.clone(),
            order,
            duration,
            watched,
            minutes_watched,
            ..existing.clone()
        })
    }
}

/// Insert nested sections with their videos under a course, inside the
/// caller's transaction.
async fn insert_sections(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    course_id: i64,
    sections: &[NewSection],
) -> Result<(), AppError> {
    for section in sections {
        let result = sqlx::query(
            r#"INSERT INTO sections (title, course_id, "order", total_video_length) VALUES (?, ?, ?, ?)"#,
        )
        .bind(&section.title)
        .bind(course_id)
        .bind(section.order)
        .bind(&section.total_video_length)
        .execute(&mut **tx)
        .await?;

        let section_id = result.last_insert_rowid();
        for video in &section.videos {
            sqlx::query(
                r#"INSERT INTO videos (title, url, section_id, "order", duration, watched, minutes_watched)
                   VALUES (?, ?, ?, ?, ?, 0, 0)"#,
            )
            .bind(&video.title)
            .bind(&video.url)
            .bind(section_id)
            .bind(video.order)
            .bind(&video.duration)
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(())
}

/// Derive the next-URL map and watched-URL list from an ordered section list.
///
/// The video after the last video of a section is the first video of the next
/// section that has any videos; sections with zero videos are skipped and
/// contribute nothing to the map. The final video of the course maps to None.
fn compute_next_urls(sections: &[SectionTree]) -> (HashMap<String, Option<String>>, Vec<String>) {
    let mut next_urls = HashMap::new();
    let mut watched_videos = Vec::new();

    for (i, tree) in sections.iter().enumerate() {
        for (j, video) in tree.videos.iter().enumerate() {
            if video.watched {
                watched_videos.push(video.url.clone());
            }
            let next = if j + 1 < tree.videos.len() {
                Some(tree.videos[j + 1].url.clone())
            } else {
                sections[i + 1..]
                    .iter()
                    .find(|s| !s.videos.is_empty())
                    .map(|s| s.videos[0].url.clone())
            };
            next_urls.insert(video.url.clone(), next);
        }
    }

    (next_urls, watched_videos)
}

// Helper functions for row conversion

fn course_from_row(row: &sqlx::sqlite::SqliteRow) -> Course {
    let archived: i32 = row.get("archived");
    Course {
        id: row.get("id"),
        title: row.get("title"),
        topic_id: row.get("topic_id"),
        last_active: row.get("last_active"),
        last_watched: row.get("last_watched"),
        archived: archived != 0,
        total_items: row.get("total_items"),
    }
}

fn section_from_row(row: &sqlx::sqlite::SqliteRow) -> Section {
    Section {
        id: row.get("id"),
        title: row.get("title"),
        course_id: row.get("course_id"),
        order: row.get("order"),
        total_video_length: row.get("total_video_length"),
    }
}

fn video_from_row(row: &sqlx::sqlite::SqliteRow) -> Video {
    let watched: i32 = row.get("watched");
    Video {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        section_id: row.get("section_id"),
        order: row.get("order"),
        duration: row.get("duration"),
        watched: watched != 0,
        minutes_watched: row.get("minutes_watched"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(section_id: i64, order: i64, url: &str, watched: bool) -> Video {
        Video {
            id: order,
            title: format!("Video {}", order),
            url: url.to_string(),
            section_id,
            order,
            duration: None,
            watched,
            minutes_watched: 0,
        }
    }

    fn section(id: i64, order: i64, videos: Vec<Video>) -> SectionTree {
        SectionTree {
            section: Section {
                id,
                title: format!("Section {}", order),
                course_id: 1,
                order,
                total_video_length: None,
            },
            videos,
        }
    }

    #[test]
    fn test_next_urls_within_section() {
        let sections = vec![section(
            1,
            1,
            vec![video(1, 1, "intro", false), video(1, 2, "setup", false)],
        )];

        let (next_urls, watched) = compute_next_urls(&sections);

        assert_eq!(next_urls["intro"], Some("setup".to_string()));
        assert_eq!(next_urls["setup"], None);
        assert!(watched.is_empty());
    }

    #[test]
    fn test_next_urls_crosses_section_boundary() {
        let sections = vec![
            section(1, 1, vec![video(1, 1, "a1", false), video(1, 2, "a2", false)]),
            section(2, 2, vec![video(2, 3, "b1", false)]),
        ];

        let (next_urls, _) = compute_next_urls(&sections);

        assert_eq!(next_urls["a2"], Some("b1".to_string()));
        assert_eq!(next_urls["b1"], None);
    }

    #[test]
    fn test_next_urls_skips_empty_sections() {
        let sections = vec![
            section(1, 1, vec![video(1, 1, "a1", false)]),
            section(2, 2, vec![]),
            section(3, 3, vec![video(3, 2, "c1", false)]),
        ];

        let (next_urls, _) = compute_next_urls(&sections);

        assert_eq!(next_urls.len(), 2);
        assert_eq!(next_urls["a1"], Some("c1".to_string()));
        assert_eq!(next_urls["c1"], None);
    }

    #[test]
    fn test_next_urls_trailing_empty_section() {
        let sections = vec![
            section(1, 1, vec![video(1, 1, "a1", false)]),
            section(2, 2, vec![]),
        ];

        let (next_urls, _) = compute_next_urls(&sections);

        assert_eq!(next_urls["a1"], None);
    }

    #[test]
    fn test_watched_videos_in_course_order() {
        let sections = vec![
            section(1, 1, vec![video(1, 1, "a1", true), video(1, 2, "a2", false)]),
            section(2, 2, vec![video(2, 3, "b1", true)]),
        ];

        let (_, watched) = compute_next_urls(&sections);

        assert_eq!(watched, vec!["a1".to_string(), "b1".to_string()]);
    }

    #[test]
    fn test_empty_course() {
        let (next_urls, watched) = compute_next_urls(&[]);
        assert!(next_urls.is_empty());
        assert!(watched.is_empty());
    }
}
