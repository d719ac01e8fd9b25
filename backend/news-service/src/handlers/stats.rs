/// Stats handler - aggregate site statistics
use crate::error::Result;
use crate::media::MediaStore;
use crate::services::NewsService;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// Aggregates over published (non-Draft) articles only
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_news: i64,
    pub total_likes: i64,
    pub total_dislikes: i64,
}

/// Site-wide statistics
/// GET /api/v1/stats/
pub async fn get_stats(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
) -> Result<HttpResponse> {
    let service = NewsService::new((**pool).clone(), (**media).clone());
    let (total_news, total_likes, total_dislikes) = service.stats().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_news,
        total_likes,
        total_dislikes,
    }))
}
