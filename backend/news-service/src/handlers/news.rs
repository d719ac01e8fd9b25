/// News handlers - HTTP endpoints for article operations
use crate::error::{AppError, Result};
use crate::media::{slugify, MediaStore, UploadedFile};
use crate::models::NewsStatus;
use crate::pagination::{Page, PageParams};
use crate::services::{news::Counter, CreateNews, NewsService, UpdateNews};
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the article listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListNewsParams {
    /// Exact, case-sensitive tag name filter
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Multipart form for creating an article. `tags` may be repeated; the
/// submitted order is preserved in the response.
#[derive(Debug, MultipartForm)]
pub struct CreateNewsForm {
    pub title: Text<String>,
    pub content: Text<String>,
    pub slug: Option<Text<String>>,
    pub status: Option<Text<NewsStatus>>,
    pub published_at: Option<Text<DateTime<Utc>>>,
    pub tags: Vec<Text<Uuid>>,
    #[multipart(limit = "10MB")]
    pub featured_image: Option<TempFile>,
}

/// JSON body for PUT/PATCH updates; absent fields are left untouched.
/// `published_at` distinguishes absent (keep) from explicit null (clear).
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1..=255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 220, message = "must be 1..=220 characters"))]
    pub slug: Option<String>,
    pub status: Option<NewsStatus>,
    #[serde(default, deserialize_with = "deserialize_nullable_patch")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub published_at: Option<Option<DateTime<Utc>>>,
    pub tags: Option<Vec<Uuid>>,
}

/// Maps a present-but-null field to `Some(None)`; serde's default handles
/// the absent case as `None`.
fn deserialize_nullable_patch<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer).map(Some)
}

/// Field rules shared by create and update
#[derive(Debug, Validate)]
struct NewsFields<'a> {
    #[validate(length(min = 1, max = 255, message = "must be 1..=255 characters"))]
    title: &'a str,
    #[validate(length(min = 1, message = "must not be empty"))]
    content: &'a str,
    #[validate(length(min = 1, max = 220, message = "must be 1..=220 characters"))]
    slug: &'a str,
}

fn service(pool: &web::Data<PgPool>, media: &web::Data<MediaStore>) -> NewsService {
    NewsService::new((**pool).clone(), (**media).clone())
}

fn uploaded_file(temp: &TempFile) -> UploadedFile {
    UploadedFile {
        path: temp.file.path().to_path_buf(),
        filename: temp.file_name.clone().unwrap_or_default(),
    }
}

/// List published articles, filtered and paginated
/// GET /api/v1/news/
pub async fn list_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    query: web::Query<ListNewsParams>,
) -> Result<HttpResponse> {
    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };

    let (items, total) = service(&pool, &media)
        .list_news(query.tag.as_deref(), params.page_size(), params.offset())
        .await?;

    Ok(HttpResponse::Ok().json(Page::new(items, total, &params)))
}

/// Retrieve one article by id
/// GET /api/v1/news/{id}/
pub async fn get_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let news = service(&pool, &media)
        .get_news(*news_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("news {}", news_id)))?;

    Ok(HttpResponse::Ok().json(news))
}

/// Create an article with nested tag associations and an optional
/// featured image upload
/// POST /api/v1/news/
pub async fn create_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    MultipartForm(form): MultipartForm<CreateNewsForm>,
) -> Result<HttpResponse> {
    let title = form.title.into_inner();
    let content = form.content.into_inner();
    let slug = match form.slug {
        Some(text) if !text.is_empty() => text.into_inner(),
        _ => slugify(&title),
    };

    NewsFields {
        title: &title,
        content: &content,
        slug: &slug,
    }
    .validate()?;

    let input = CreateNews {
        title,
        content,
        slug,
        status: form.status.map(|s| s.into_inner()).unwrap_or_default(),
        published_at: form.published_at.map(|t| t.into_inner()),
        tags: form.tags.iter().map(|t| t.0).collect(),
    };
    let upload = form.featured_image.as_ref().map(uploaded_file);

    let news = service(&pool, &media).create_news(input, upload).await?;

    Ok(HttpResponse::Created().json(news))
}

/// Full or partial update of an article
/// PUT/PATCH /api/v1/news/{id}/
pub async fn update_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
    req: web::Json<UpdateNewsRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let patch = UpdateNews {
        title: req.title,
        content: req.content,
        slug: req.slug,
        status: req.status,
        published_at: req.published_at,
        tags: req.tags,
    };

    let news = service(&pool, &media)
        .update_news(*news_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("news {}", news_id)))?;

    Ok(HttpResponse::Ok().json(news))
}

/// Multipart form carrying a replacement featured image
#[derive(Debug, MultipartForm)]
pub struct FeaturedImageForm {
    #[multipart(limit = "10MB")]
    pub featured_image: TempFile,
}

/// Replace the featured image of an article
/// POST /api/v1/news/{id}/featured_image/
pub async fn upload_featured_image(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<FeaturedImageForm>,
) -> Result<HttpResponse> {
    let news = service(&pool, &media)
        .set_featured_image(*news_id, uploaded_file(&form.featured_image))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("news {}", news_id)))?;

    Ok(HttpResponse::Ok().json(news))
}

/// Delete an article and its images
/// DELETE /api/v1/news/{id}/
pub async fn delete_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let deleted = service(&pool, &media).delete_news(*news_id).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("news {}", news_id)))
    }
}

async fn increment(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: Uuid,
    counter: Counter,
) -> Result<HttpResponse> {
    let news = service(&pool, &media)
        .increment(news_id, counter)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("news {}", news_id)))?;

    Ok(HttpResponse::Ok().json(news))
}

/// Add one like
/// POST /api/v1/news/{id}/like/
pub async fn like_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    increment(pool, media, *news_id, Counter::Like).await
}

/// Add one dislike
/// POST /api/v1/news/{id}/dislike/
pub async fn dislike_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    increment(pool, media, *news_id, Counter::Dislike).await
}

/// Record one view
/// POST /api/v1/news/{id}/view/
pub async fn view_news(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    news_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    increment(pool, media, *news_id, Counter::View).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_published_at_means_keep() {
        let req: UpdateNewsRequest = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(req.published_at, None);
    }

    #[test]
    fn null_published_at_means_clear() {
        let req: UpdateNewsRequest = serde_json::from_str(r#"{"published_at": null}"#).unwrap();
        assert_eq!(req.published_at, Some(None));
    }

    #[test]
    fn timestamp_published_at_sets_value() {
        let req: UpdateNewsRequest =
            serde_json::from_str(r#"{"published_at": "2026-01-15T09:30:00Z"}"#).unwrap();
        let ts = req.published_at.flatten().expect("timestamp");
        assert_eq!(ts.to_rfc3339(), "2026-01-15T09:30:00+00:00");
    }
}
