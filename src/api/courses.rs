//! Course aggregate API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, ApiResult, ListQuery};
use crate::errors::AppError;
use crate::models::{
    AddSectionsRequest, Course, CourseTree, CreateCourseRequest, ResourcePage, Section,
    UpdateCourseRequest, UpdateSectionRequest, UpdateVideoRequest, Video,
};
use crate::AppState;

/// POST /api/courses - Create a course with its full section/video tree.
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> ApiResult<Course> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if state.repo.find_topic_by_id(request.topic_id).await?.is_none() {
        return Err(AppError::NotFound("Topic was not found!".to_string()));
    }

    let course = state.repo.create_course(&request).await?;
    success(course)
}

/// GET /api/courses/:id - Get the full course tree with derived next-URL and
/// watched-video data.
pub async fn get_course(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<CourseTree> {
    let course = state
        .repo
        .find_course_tree(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course was not found!".to_string()))?;

    success(course)
}

/// GET /api/courses/topic/:topicId - List a page of a topic's courses.
pub async fn list_courses(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ResourcePage<Course>> {
    if state.repo.find_topic_by_id(topic_id).await?.is_none() {
        return Err(AppError::NotFound("Topic was not found!".to_string()));
    }

    let resources = state
        .repo
        .list_courses(topic_id, query.page, query.items_per_page, query.archived)
        .await?;
    let count = state.repo.count_courses(topic_id, query.archived).await?;

    success(ResourcePage { resources, count })
}

/// PUT /api/courses/:id - Update a course (partial merge; omitting `archived`
/// resets it; `lastActive` always refreshes).
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCourseRequest>,
) -> ApiResult<Course> {
    let existing = state
        .repo
        .find_course_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course was not found!".to_string()))?;

    let course = state.repo.update_course(&existing, &request).await?;
    success(course)
}

/// PUT /api/courses/:id/sections - Append sections to an existing course.
pub async fn add_sections_to_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AddSectionsRequest>,
) -> ApiResult<Course> {
    let existing = state
        .repo
        .find_course_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course was not found!".to_string()))?;

    let course = state.repo.add_sections_to_course(&existing, &request).await?;
    success(course)
}

/// POST /api/courses/:id/last-watched - Recompute the course's furthest
/// watched video from its watched flags.
pub async fn update_last_watched(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Course> {
    let existing = state
        .repo
        .find_course_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course was not found!".to_string()))?;

    let course = state.repo.update_last_watched(&existing).await?;
    success(course)
}

/// DELETE /api/courses/:id - Delete a course and its sections/videos.
pub async fn delete_course(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_course(id).await?;
    success(())
}

/// GET /api/sections/:id - Get a single section (no tree reconstruction).
pub async fn get_section(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Section> {
    let section = state
        .repo
        .find_section_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Section was not found!".to_string()))?;

    success(section)
}

/// PUT /api/sections/:id - Update a section.
pub async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSectionRequest>,
) -> ApiResult<Section> {
    let existing = state
        .repo
        .find_section_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Section was not found!".to_string()))?;

    let section = state.repo.update_section(&existing, &request).await?;
    success(section)
}

/// GET /api/videos/:id - Get a single video.
pub async fn get_video(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Video> {
    let video = state
        .repo
        .find_video_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video was not found!".to_string()))?;

    success(video)
}

/// PUT /api/videos/:id - Update a video (partial merge; omitting `watched`
/// resets it).
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVideoRequest>,
) -> ApiResult<Video> {
    let existing = state
        .repo
        .find_video_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video was not found!".to_string()))?;

    let video = state.repo.update_video(&existing, &request).await?;
    success(video)
}
