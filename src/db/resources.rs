//! Flat resource operations: articles, PDFs and YouTube links.
//!
//! The three kinds follow one contract: create under an existing topic, get
//! by id, partial-merge update, hard delete, and offset-paginated listing by
//! topic filtered on the `archived` flag.

use sqlx::Row;

use super::repository::{now_ms, page_offset, Repository};
use crate::errors::AppError;
use crate::models::{
    Article, CreatePdfRequest, CreateResourceRequest, Pdf, UpdateResourceRequest, Youtube,
};

impl Repository {
    // ==================== ARTICLE OPERATIONS ====================

    pub async fn create_article(&self, request: &CreateResourceRequest) -> Result<Article, AppError> {
        let last_active = now_ms();
        let result = sqlx::query(
            "INSERT INTO articles (title, url, topic_id, last_active, archived) VALUES (?, ?, ?, ?, 0)",
        )
        .bind(&request.title)
        .bind(&request.url)
        .bind(request.topic_id)
        .bind(last_active)
        .execute(&self.pool)
        .await?;

        Ok(Article {
            id: result.last_insert_rowid(),
            title: request.title.clone(),
            url: request.url.clone(),
            topic_id: request.topic_id,
            last_active,
            archived: false,
        })
    }

    pub async fn find_article_by_id(&self, id: i64) -> Result<Option<Article>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, url, topic_id, last_active, archived FROM articles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(article_from_row))
    }

    /// Update an article, merging present fields. `archived` is taken from
    /// the request as-is: omitted means false.
    pub async fn update_article(
        &self,
        existing: &Article,
        request: &UpdateResourceRequest,
    ) -> Result<Article, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let last_active = request.last_active.unwrap_or(existing.last_active);
        let archived = request.archived;

        sqlx::query("UPDATE articles SET title = ?, last_active = ?, archived = ? WHERE id = ?")
            .bind(title)
            .bind(last_active)
            .bind(archived as i32)
            .bind(existing.id)
            .execute(&self.pool)
            .await?;

        Ok(Article {
            title: title.clone(),
            last_active,
            archived,
            ..existing.clone()
        })
    }

    pub async fn delete_article(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article {} not found", id)));
        }

        Ok(())
    }

    pub async fn list_articles(
        &self,
        topic_id: i64,
        page: i64,
        items_per_page: i64,
        archived: bool,
    ) -> Result<Vec<Article>, AppError> {
        let (limit, offset) = page_offset(page, items_per_page);
        let rows = sqlx::query(
            r#"SELECT id, title, url, topic_id, last_active, archived FROM articles
               WHERE topic_id = ? AND archived = ?
               ORDER BY last_active DESC LIMIT ? OFFSET ?"#,
        )
        .bind(topic_id)
        .bind(archived as i32)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(article_from_row).collect())
    }

    pub async fn count_articles(&self, topic_id: i64, archived: bool) -> Result<i64, AppError> {
        let row =
            sqlx::query("SELECT COUNT(id) AS count FROM articles WHERE topic_id = ? AND archived = ?")
                .bind(topic_id)
                .bind(archived as i32)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.get("count"))
    }

    // ==================== PDF OPERATIONS ====================

    pub async fn create_pdf(&self, request: &CreatePdfRequest) -> Result<Pdf, AppError> {
        let last_active = now_ms();
        let result = sqlx::query(
            r#"INSERT INTO pdfs (title, url, topic_id, num_pages, last_page_read, last_active, archived)
               VALUES (?, ?, ?, ?, 0, ?, 0)"#,
        )
        .bind(&request.title)
        .bind(&request.url)
        .bind(request.topic_id)
        .bind(request.num_pages)
        .bind(last_active)
        .execute(&self.pool)
        .await?;

        Ok(Pdf {
            id: result.last_insert_rowid(),
            title: request.title.clone(),
            url: request.url.clone(),
            topic_id: request.topic_id,
            num_pages: request.num_pages,
            last_page_read: 0,
            last_active,
            archived: false,
        })
    }

    pub async fn find_pdf_by_id(&self, id: i64) -> Result<Option<Pdf>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, url, topic_id, num_pages, last_page_read, last_active, archived
               FROM pdfs WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(pdf_from_row))
    }

    /// Update a PDF. Same merge rules as articles plus reading progress.
    pub async fn update_pdf(
        &self,
        existing: &Pdf,
        request: &UpdateResourceRequest,
    ) -> Result<Pdf, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let last_page_read = request.last_page_read.unwrap_or(existing.last_page_read);
        let last_active = request.last_active.unwrap_or(existing.last_active);
        let archived = request.archived;

        sqlx::query(
            "UPDATE pdfs SET title = ?, last_page_read = ?, last_active = ?, archived = ? WHERE id = ?",
        )
        .bind(title)
        .bind(last_page_read)
        .bind(last_active)
        .bind(archived as i32)
        .bind(existing.id)
        .execute(&self.pool)
        .await?;

        Ok(Pdf {
            title: title.clone(),
            last_page_read,
            last_active,
            archived,
            ..existing.clone()
        })
    }

    pub async fn delete_pdf(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pdfs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Pdf {} not found", id)));
        }

        Ok(())
    }

    pub async fn list_pdfs(
        &self,
        topic_id: i64,
        page: i64,
        items_per_page: i64,
        archived: bool,
    ) -> Result<Vec<Pdf>, AppError> {
        let (limit, offset) = page_offset(page, items_per_page);
        let rows = sqlx::query(
            r#"SELECT id, title, url, topic_id, num_pages, last_page_read, last_active, archived
               FROM pdfs WHERE topic_id = ? AND archived = ?
               ORDER BY last_active DESC LIMIT ? OFFSET ?"#,
        )
        .bind(topic_id)
        .bind(archived as i32)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pdf_from_row).collect())
    }

    pub async fn count_pdfs(&self, topic_id: i64, archived: bool) -> Result<i64, AppError> {
        let row =
            sqlx::query("SELECT COUNT(id) AS count FROM pdfs WHERE topic_id = ? AND archived = ?")
                .bind(topic_id)
                .bind(archived as i32)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.get("count"))
    }

    // ==================== YOUTUBE OPERATIONS ====================

    pub async fn create_youtube_link(
        &self,
        request: &CreateResourceRequest,
    ) -> Result<Youtube, AppError> {
        let last_active = now_ms();
        let result = sqlx::query(
            "INSERT INTO youtube_links (title, url, topic_id, last_active, archived) VALUES (?, ?, ?, ?, 0)",
        )
        .bind(&request.title)
        .bind(&request.url)
        .bind(request.topic_id)
        .bind(last_active)
        .execute(&self.pool)
        .await?;

        Ok(Youtube {
            id: result.last_insert_rowid(),
            title: request.title.clone(),
            url: request.url.clone(),
            topic_id: request.topic_id,
            last_active,
            archived: false,
        })
    }

    pub async fn find_youtube_link_by_id(&self, id: i64) -> Result<Option<Youtube>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, url, topic_id, last_active, archived FROM youtube_links WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(youtube_from_row))
    }

    pub async fn update_youtube_link(
        &self,
        existing: &Youtube,
        request: &UpdateResourceRequest,
    ) -> Result<Youtube, AppError> {
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let last_active = request.last_active.unwrap_or(existing.last_active);
        let archived = request.archived;

        sqlx::query("UPDATE youtube_links SET title = ?, last_active = ?, archived = ? WHERE id = ?")
            .bind(title)
            .bind(last_active)
            .bind(archived as i32)
            .bind(existing.id)
            .execute(&self.pool)
            .await?;

        Ok(Youtube {
            title: title.clone(),
            last_active,
            archived,
            ..existing.clone()
        })
    }

    pub async fn delete_youtube_link(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM youtube_links WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Youtube link {} not found", id)));
        }

        Ok(())
    }

    pub async fn list_youtube_links(
        &self,
        topic_id: i64,
        page: i64,
        items_per_page: i64,
        archived: bool,
    ) -> Result<Vec<Youtube>, AppError> {
        let (limit, offset) = page_offset(page, items_per_page);
        let rows = sqlx::query(
            r#"SELECT id, title, url, topic_id, last_active, archived FROM youtube_links
               WHERE topic_id = ? AND archived = ?
               ORDER BY last_active DESC LIMIT ? OFFSET ?"#,
        )
        .bind(topic_id)
        .bind(archived as i32)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(youtube_from_row).collect())
    }

    pub async fn count_youtube_links(&self, topic_id: i64, archived: bool) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(id) AS count FROM youtube_links WHERE topic_id = ? AND archived = ?",
        )
        .bind(topic_id)
        .bind(archived as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("count"))
    }
}

// Helper functions for row conversion

fn article_from_row(row: &sqlx::sqlite::SqliteRow) -> Article {
    let archived: i32 = row.get("archived");
    Article {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        topic_id: row.get("topic_id"),
        last_active: row.get("last_active"),
        archived: archived != 0,
    }
}

fn pdf_from_row(row: &sqlx::sqlite::SqliteRow) -> Pdf {
    let archived: i32 = row.get("archived");
    Pdf {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        topic_id: row.get("topic_id"),
        num_pages: row.get("num_pages"),
        last_page_read: row.get("last_page_read"),
        last_active: row.get("last_active"),
        archived: archived != 0,
    }
}

fn youtube_from_row(row: &sqlx::sqlite::SqliteRow) -> Youtube {
    let archived: i32 = row.get("archived");
    Youtube {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        topic_id: row.get("topic_id"),
        last_active: row.get("last_active"),
        archived: archived != 0,
    }
}
