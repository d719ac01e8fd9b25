use crate::models::NewsImage;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Insert a gallery image for an article, appended after its siblings
pub async fn create_image(
    pool: &PgPool,
    news_id: Uuid,
    image: &str,
    caption: Option<&str>,
) -> Result<NewsImage, sqlx::Error> {
    let row = sqlx::query_as::<_, NewsImage>(
        r#"
        INSERT INTO news_images (news_id, image, caption, position)
        VALUES (
            $1,
            $2,
            $3,
            COALESCE((SELECT MAX(position) + 1 FROM news_images WHERE news_id = $1), 0)
        )
        RETURNING id, news_id, image, caption, position
        "#,
    )
    .bind(news_id)
    .bind(image)
    .bind(caption)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Find an image by ID
pub async fn find_image_by_id(
    pool: &PgPool,
    image_id: Uuid,
) -> Result<Option<NewsImage>, sqlx::Error> {
    let image = sqlx::query_as::<_, NewsImage>(
        r#"
        SELECT id, news_id, image, caption, position
        FROM news_images
        WHERE id = $1
        "#,
    )
    .bind(image_id)
    .fetch_optional(pool)
    .await?;

    Ok(image)
}

/// List all images grouped by owning article, in insertion order
pub async fn list_images(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<NewsImage>, sqlx::Error> {
    let images = sqlx::query_as::<_, NewsImage>(
        r#"
        SELECT id, news_id, image, caption, position
        FROM news_images
        ORDER BY news_id, position, id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

/// Count all images
pub async fn count_images(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM news_images")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Update an image caption
pub async fn update_caption(
    pool: &PgPool,
    image_id: Uuid,
    caption: Option<&str>,
) -> Result<Option<NewsImage>, sqlx::Error> {
    let image = sqlx::query_as::<_, NewsImage>(
        r#"
        UPDATE news_images
        SET caption = $1
        WHERE id = $2
        RETURNING id, news_id, image, caption, position
        "#,
    )
    .bind(caption)
    .bind(image_id)
    .fetch_optional(pool)
    .await?;

    Ok(image)
}

/// Delete an image row, returning it so the stored file can be removed too
pub async fn delete_image(
    pool: &PgPool,
    image_id: Uuid,
) -> Result<Option<NewsImage>, sqlx::Error> {
    let image = sqlx::query_as::<_, NewsImage>(
        r#"
        DELETE FROM news_images
        WHERE id = $1
        RETURNING id, news_id, image, caption, position
        "#,
    )
    .bind(image_id)
    .fetch_optional(pool)
    .await?;

    Ok(image)
}
