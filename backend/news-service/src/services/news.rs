/// News service - article CRUD, counter increments, and site statistics
use crate::db::{news_repo, tag_repo};
use crate::error::{AppError, Result};
use crate::media::{MediaStore, UploadedFile};
use crate::models::{News, NewsDetail, NewsStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub use crate::db::news_repo::Counter;

/// Validated input for creating an article
#[derive(Debug)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: NewsStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<Uuid>,
}

/// Partial update; absent fields keep their current value. A present
/// `tags` list replaces the whole association set.
#[derive(Debug, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub status: Option<NewsStatus>,
    pub published_at: Option<Option<DateTime<Utc>>>,
    pub tags: Option<Vec<Uuid>>,
}

pub struct NewsService {
    pool: PgPool,
    media: MediaStore,
}

impl NewsService {
    pub fn new(pool: PgPool, media: MediaStore) -> Self {
        Self { pool, media }
    }

    /// Get an article with its tags and images
    pub async fn get_news(&self, news_id: Uuid) -> Result<Option<NewsDetail>> {
        let news = match news_repo::find_news_by_id(&self.pool, news_id).await? {
            Some(news) => news,
            None => return Ok(None),
        };

        Ok(Some(self.load_detail(news).await?))
    }

    /// List published articles, optionally filtered by exact tag name.
    /// Returns one page of detail representations plus the filtered total.
    pub async fn list_news(
        &self,
        tag: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<NewsDetail>, i64)> {
        let rows = news_repo::list_published(&self.pool, tag, limit, offset).await?;
        let total = news_repo::count_published(&self.pool, tag).await?;

        let mut details = Vec::with_capacity(rows.len());
        for news in rows {
            details.push(self.load_detail(news).await?);
        }

        Ok((details, total))
    }

    /// Create an article together with its tag associations and optional
    /// featured image. Tag references are validated before anything is
    /// persisted; the row and associations commit atomically.
    pub async fn create_news(
        &self,
        input: CreateNews,
        featured_image: Option<UploadedFile>,
    ) -> Result<NewsDetail> {
        let mut tx = self.pool.begin().await?;

        let missing = tag_repo::missing_tag_ids(&mut *tx, &input.tags).await?;
        if !missing.is_empty() {
            return Err(AppError::field(
                "tags",
                format!(
                    "unknown tag ids: {}",
                    missing
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }

        let stored_image = match &featured_image {
            Some(upload) => {
                let relative =
                    MediaStore::featured_image_path(&input.slug, &input.title, &upload.filename);
                Some(self.media.store(&relative, &upload.path).await?)
            }
            None => None,
        };

        let inserted = async {
            let news = news_repo::create_news(
                &mut *tx,
                &input.title,
                &input.content,
                &input.slug,
                input.status,
                input.published_at,
                stored_image.as_deref(),
            )
            .await?;
            news_repo::set_tags(&mut *tx, news.id, &input.tags).await?;
            tx.commit().await?;
            Ok::<_, AppError>(news)
        }
        .await;

        let news = match inserted {
            Ok(news) => news,
            Err(err) => {
                // The row never committed, so the stored file is an orphan
                if let Some(path) = &stored_image {
                    self.media.remove(path).await;
                }
                return Err(err);
            }
        };

        crate::metrics::NEWS_CREATED_TOTAL.inc();
        tracing::info!(news_id = %news.id, slug = %news.slug, "news article created");

        self.load_detail(news).await
    }

    /// Apply a partial update. Returns None for an unknown id.
    pub async fn update_news(
        &self,
        news_id: Uuid,
        patch: UpdateNews,
    ) -> Result<Option<NewsDetail>> {
        let mut tx = self.pool.begin().await?;

        if let Some(tags) = &patch.tags {
            let missing = tag_repo::missing_tag_ids(&mut *tx, tags).await?;
            if !missing.is_empty() {
                return Err(AppError::field(
                    "tags",
                    format!(
                        "unknown tag ids: {}",
                        missing
                            .iter()
                            .map(|id| id.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ));
            }
        }

        let current = match news_repo::find_news_by_id(&self.pool, news_id).await? {
            Some(news) => news,
            None => return Ok(None),
        };

        let title = patch.title.unwrap_or(current.title);
        let content = patch.content.unwrap_or(current.content);
        let slug = patch.slug.unwrap_or(current.slug);
        let status = patch.status.unwrap_or(current.status);
        let published_at = patch.published_at.unwrap_or(current.published_at);

        let updated = news_repo::update_news(
            &mut *tx,
            news_id,
            &title,
            &content,
            &slug,
            status,
            published_at,
            current.featured_image.as_deref(),
        )
        .await?;

        let news = match updated {
            Some(news) => news,
            None => return Ok(None),
        };

        if let Some(tags) = &patch.tags {
            news_repo::set_tags(&mut *tx, news.id, tags).await?;
        }

        tx.commit().await?;

        Ok(Some(self.load_detail(news).await?))
    }

    /// Replace the featured image, removing the previously stored file
    pub async fn set_featured_image(
        &self,
        news_id: Uuid,
        upload: UploadedFile,
    ) -> Result<Option<NewsDetail>> {
        let current = match news_repo::find_news_by_id(&self.pool, news_id).await? {
            Some(news) => news,
            None => return Ok(None),
        };

        let relative =
            MediaStore::featured_image_path(&current.slug, &current.title, &upload.filename);
        let stored = self.media.store(&relative, &upload.path).await?;

        let mut tx = self.pool.begin().await?;
        let updated = news_repo::set_featured_image(&mut *tx, news_id, &stored).await?;
        tx.commit().await?;

        if let Some(previous) = current.featured_image {
            if previous != stored {
                self.media.remove(&previous).await;
            }
        }

        match updated {
            Some(news) => Ok(Some(self.load_detail(news).await?)),
            None => Ok(None),
        }
    }

    /// Delete an article. The database cascade removes image rows and tag
    /// associations; stored files are cleaned up afterwards.
    pub async fn delete_news(&self, news_id: Uuid) -> Result<bool> {
        let current = match news_repo::find_news_by_id(&self.pool, news_id).await? {
            Some(news) => news,
            None => return Ok(false),
        };
        let images = news_repo::images_for_news(&self.pool, news_id).await?;

        let mut tx = self.pool.begin().await?;
        let deleted = news_repo::delete_news(&mut *tx, news_id).await?;
        tx.commit().await?;

        if deleted {
            if let Some(path) = &current.featured_image {
                self.media.remove(path).await;
            }
            for image in &images {
                self.media.remove(&image.image).await;
            }
            crate::metrics::NEWS_DELETED_TOTAL.inc();
            tracing::info!(%news_id, image_count = images.len(), "news article deleted");
        }

        Ok(deleted)
    }

    /// Atomically add 1 to a counter, returning the updated representation
    pub async fn increment(&self, news_id: Uuid, counter: Counter) -> Result<Option<NewsDetail>> {
        match news_repo::increment_counter(&self.pool, news_id, counter).await? {
            Some(news) => {
                let kind = match counter {
                    Counter::View => "view",
                    Counter::Like => "like",
                    Counter::Dislike => "dislike",
                };
                crate::metrics::REACTIONS_TOTAL.with_label_values(&[kind]).inc();
                Ok(Some(self.load_detail(news).await?))
            }
            None => Ok(None),
        }
    }

    /// Site statistics over published articles:
    /// (total articles, total likes, total dislikes)
    pub async fn stats(&self) -> Result<(i64, i64, i64)> {
        Ok(news_repo::site_stats(&self.pool).await?)
    }

    async fn load_detail(&self, news: News) -> Result<NewsDetail> {
        let tags = news_repo::tags_for_news(&self.pool, news.id).await?;
        let images = news_repo::images_for_news(&self.pool, news.id).await?;
        Ok(NewsDetail::from_parts(news, tags, images))
    }
}
