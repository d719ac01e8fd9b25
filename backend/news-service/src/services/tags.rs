/// Tag service - label CRUD
use crate::db::tag_repo;
use crate::error::Result;
use crate::models::Tag;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a tag. Duplicate names surface as validation errors via the
    /// unique-constraint mapping in `AppError`.
    pub async fn create_tag(&self, name: &str) -> Result<Tag> {
        Ok(tag_repo::create_tag(&self.pool, name).await?)
    }

    pub async fn get_tag(&self, tag_id: Uuid) -> Result<Option<Tag>> {
        Ok(tag_repo::find_tag_by_id(&self.pool, tag_id).await?)
    }

    /// One page of tags in name order, plus the total count
    pub async fn list_tags(&self, limit: i64, offset: i64) -> Result<(Vec<Tag>, i64)> {
        let tags = tag_repo::list_tags(&self.pool, limit, offset).await?;
        let total = tag_repo::count_tags(&self.pool).await?;
        Ok((tags, total))
    }

    pub async fn update_tag(&self, tag_id: Uuid, name: &str) -> Result<Option<Tag>> {
        Ok(tag_repo::update_tag(&self.pool, tag_id, name).await?)
    }

    pub async fn delete_tag(&self, tag_id: Uuid) -> Result<bool> {
        Ok(tag_repo::delete_tag(&self.pool, tag_id).await?)
    }
}
