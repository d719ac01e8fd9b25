/// Image handlers - HTTP endpoints for gallery image operations
use crate::error::{AppError, Result};
use crate::media::{MediaStore, UploadedFile};
use crate::pagination::{Page, PageParams};
use crate::services::ImageService;
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Multipart form for uploading a gallery image
#[derive(Debug, MultipartForm)]
pub struct UploadImageForm {
    /// Id of the owning news article
    pub news: Text<Uuid>,
    pub caption: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: TempFile,
}

/// JSON body for caption updates; `null` clears the caption
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateImageRequest {
    pub caption: Option<String>,
}

fn service(pool: &web::Data<PgPool>, media: &web::Data<MediaStore>) -> ImageService {
    ImageService::new((**pool).clone(), (**media).clone())
}

/// List gallery images, paginated
/// GET /api/v1/images/
pub async fn list_images(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let params = query.into_inner();
    let (items, total) = service(&pool, &media)
        .list_images(params.page_size(), params.offset())
        .await?;

    Ok(HttpResponse::Ok().json(Page::new(items, total, &params)))
}

/// Retrieve one image
/// GET /api/v1/images/{id}/
pub async fn get_image(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    image_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let image = service(&pool, &media)
        .get_image(*image_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("image {}", image_id)))?;

    Ok(HttpResponse::Ok().json(image))
}

/// Upload a gallery image for an article
/// POST /api/v1/images/
pub async fn upload_image(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> Result<HttpResponse> {
    let upload = UploadedFile {
        path: form.image.file.path().to_path_buf(),
        filename: form.image.file_name.clone().unwrap_or_default(),
    };

    let image = service(&pool, &media)
        .create_image(
            form.news.0,
            form.caption.as_deref().map(String::as_str),
            upload,
        )
        .await?;

    Ok(HttpResponse::Created().json(image))
}

/// Update an image caption
/// PUT/PATCH /api/v1/images/{id}/
pub async fn update_image(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    image_id: web::Path<Uuid>,
    req: web::Json<UpdateImageRequest>,
) -> Result<HttpResponse> {
    let image = service(&pool, &media)
        .update_caption(*image_id, req.caption.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("image {}", image_id)))?;

    Ok(HttpResponse::Ok().json(image))
}

/// Delete an image and its stored file
/// DELETE /api/v1/images/{id}/
pub async fn delete_image(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    image_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let deleted = service(&pool, &media).delete_image(*image_id).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("image {}", image_id)))
    }
}
