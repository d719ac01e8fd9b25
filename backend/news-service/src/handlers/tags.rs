/// Tag handlers - HTTP endpoints for tag operations
use crate::error::{AppError, Result};
use crate::pagination::{Page, PageParams};
use crate::services::TagService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating or renaming a tag
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct TagRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1..=50 characters"))]
    pub name: String,
}

/// List tags in name order, paginated
/// GET /api/v1/tags/
pub async fn list_tags(
    pool: web::Data<PgPool>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let params = query.into_inner();
    let service = TagService::new((**pool).clone());
    let (items, total) = service
        .list_tags(params.page_size(), params.offset())
        .await?;

    Ok(HttpResponse::Ok().json(Page::new(items, total, &params)))
}

/// Retrieve one tag
/// GET /api/v1/tags/{id}/
pub async fn get_tag(pool: web::Data<PgPool>, tag_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let tag = service
        .get_tag(*tag_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", tag_id)))?;

    Ok(HttpResponse::Ok().json(tag))
}

/// Create a tag
/// POST /api/v1/tags/
pub async fn create_tag(
    pool: web::Data<PgPool>,
    req: web::Json<TagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = TagService::new((**pool).clone());
    let tag = service.create_tag(&req.name).await?;

    Ok(HttpResponse::Created().json(tag))
}

/// Rename a tag
/// PUT/PATCH /api/v1/tags/{id}/
pub async fn update_tag(
    pool: web::Data<PgPool>,
    tag_id: web::Path<Uuid>,
    req: web::Json<TagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = TagService::new((**pool).clone());
    let tag = service
        .update_tag(*tag_id, &req.name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {}", tag_id)))?;

    Ok(HttpResponse::Ok().json(tag))
}

/// Delete a tag
/// DELETE /api/v1/tags/{id}/
pub async fn delete_tag(pool: web::Data<PgPool>, tag_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let deleted = service.delete_tag(*tag_id).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("tag {}", tag_id)))
    }
}
