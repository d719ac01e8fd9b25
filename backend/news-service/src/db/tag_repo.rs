use crate::models::Tag;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

/// Create a new tag
/// Returns the created tag, or a unique-violation error for duplicate names
pub async fn create_tag(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(tag)
}

/// Find a tag by ID
pub async fn find_tag_by_id(pool: &PgPool, tag_id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name
        FROM tags
        WHERE id = $1
        "#,
    )
    .bind(tag_id)
    .fetch_optional(pool)
    .await?;

    Ok(tag)
}

/// List tags ordered by name
pub async fn list_tags(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Tag>, sqlx::Error> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name
        FROM tags
        ORDER BY name
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Count all tags
pub async fn count_tags(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM tags")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Rename a tag
pub async fn update_tag(
    pool: &PgPool,
    tag_id: Uuid,
    name: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tags
        SET name = $1
        WHERE id = $2
        RETURNING id, name
        "#,
    )
    .bind(name)
    .bind(tag_id)
    .fetch_optional(pool)
    .await?;

    Ok(tag)
}

/// Delete a tag. Associations in news_tags go with it via the cascade.
pub async fn delete_tag(pool: &PgPool, tag_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = $1")
        .bind(tag_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Which of the given tag ids do not exist. Used to validate nested tag
/// references before any article write happens.
pub async fn missing_tag_ids(
    conn: &mut PgConnection,
    tag_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid,)>(
        r#"
        SELECT t.id
        FROM UNNEST($1::uuid[]) AS t(id)
        WHERE NOT EXISTS (SELECT 1 FROM tags WHERE tags.id = t.id)
        "#,
    )
    .bind(tag_ids)
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
