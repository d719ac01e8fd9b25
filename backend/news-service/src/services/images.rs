/// Image service - gallery image CRUD and stored-file bookkeeping
use crate::db::{image_repo, news_repo};
use crate::error::{AppError, Result};
use crate::media::{MediaStore, UploadedFile};
use crate::models::NewsImage;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ImageService {
    pool: PgPool,
    media: MediaStore,
}

impl ImageService {
    pub fn new(pool: PgPool, media: MediaStore) -> Self {
        Self { pool, media }
    }

    /// Attach an uploaded image to an article. The article reference is
    /// validated before the file is written or the row inserted.
    pub async fn create_image(
        &self,
        news_id: Uuid,
        caption: Option<&str>,
        upload: UploadedFile,
    ) -> Result<NewsImage> {
        let news = match news_repo::find_news_by_id(&self.pool, news_id).await? {
            Some(news) => news,
            None => {
                return Err(AppError::field(
                    "news",
                    format!("unknown news id: {}", news_id),
                ))
            }
        };

        let relative = MediaStore::news_image_path(&news.slug, &news.title, &upload.filename);
        let stored = self.media.store(&relative, &upload.path).await?;

        match image_repo::create_image(&self.pool, news_id, &stored, caption).await {
            Ok(image) => Ok(image),
            Err(err) => {
                self.media.remove(&stored).await;
                Err(err.into())
            }
        }
    }

    pub async fn get_image(&self, image_id: Uuid) -> Result<Option<NewsImage>> {
        Ok(image_repo::find_image_by_id(&self.pool, image_id).await?)
    }

    /// One page of images plus the total count
    pub async fn list_images(&self, limit: i64, offset: i64) -> Result<(Vec<NewsImage>, i64)> {
        let images = image_repo::list_images(&self.pool, limit, offset).await?;
        let total = image_repo::count_images(&self.pool).await?;
        Ok((images, total))
    }

    pub async fn update_caption(
        &self,
        image_id: Uuid,
        caption: Option<&str>,
    ) -> Result<Option<NewsImage>> {
        Ok(image_repo::update_caption(&self.pool, image_id, caption).await?)
    }

    /// Delete an image row and its stored file
    pub async fn delete_image(&self, image_id: Uuid) -> Result<bool> {
        match image_repo::delete_image(&self.pool, image_id).await? {
            Some(image) => {
                self.media.remove(&image.image).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
