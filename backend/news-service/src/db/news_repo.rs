use crate::models::{News, NewsImage, NewsStatus, Tag};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

/// Which article counter an increment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    View,
    Like,
    Dislike,
}

/// Insert a news row. Runs inside the caller's transaction so that tag
/// association failures roll the article back too.
pub async fn create_news(
    conn: &mut PgConnection,
    title: &str,
    content: &str,
    slug: &str,
    status: NewsStatus,
    published_at: Option<DateTime<Utc>>,
    featured_image: Option<&str>,
) -> Result<News, sqlx::Error> {
    let news = sqlx::query_as::<_, News>(
        r#"
        INSERT INTO news (title, content, slug, status, published_at, featured_image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, content, slug, status, featured_image, published_at,
                  created_at, updated_at, view_count, like_count, dislike_count
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(slug)
    .bind(status)
    .bind(published_at)
    .bind(featured_image)
    .fetch_one(conn)
    .await?;

    Ok(news)
}

/// Find a news article by ID
pub async fn find_news_by_id(pool: &PgPool, news_id: Uuid) -> Result<Option<News>, sqlx::Error> {
    let news = sqlx::query_as::<_, News>(
        r#"
        SELECT id, title, content, slug, status, featured_image, published_at,
               created_at, updated_at, view_count, like_count, dislike_count
        FROM news
        WHERE id = $1
        "#,
    )
    .bind(news_id)
    .fetch_optional(pool)
    .await?;

    Ok(news)
}

/// List published articles, optionally restricted to an exact tag name.
/// The filter is applied before LIMIT/OFFSET.
/// Returns articles in descending order by creation date.
pub async fn list_published(
    pool: &PgPool,
    tag: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<News>, sqlx::Error> {
    let news = match tag {
        Some(tag_name) => {
            sqlx::query_as::<_, News>(
                r#"
                SELECT n.id, n.title, n.content, n.slug, n.status, n.featured_image,
                       n.published_at, n.created_at, n.updated_at,
                       n.view_count, n.like_count, n.dislike_count
                FROM news n
                JOIN news_tags nt ON nt.news_id = n.id
                JOIN tags t ON t.id = nt.tag_id
                WHERE n.status = $1 AND t.name = $2
                ORDER BY n.created_at DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(NewsStatus::Published)
            .bind(tag_name)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, News>(
                r#"
                SELECT id, title, content, slug, status, featured_image, published_at,
                       created_at, updated_at, view_count, like_count, dislike_count
                FROM news
                WHERE status = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(NewsStatus::Published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(news)
}

/// Count published articles matching the same filter as `list_published`
pub async fn count_published(pool: &PgPool, tag: Option<&str>) -> Result<i64, sqlx::Error> {
    let row = match tag {
        Some(tag_name) => {
            sqlx::query(
                r#"
                SELECT COUNT(*) as count
                FROM news n
                JOIN news_tags nt ON nt.news_id = n.id
                JOIN tags t ON t.id = nt.tag_id
                WHERE n.status = $1 AND t.name = $2
                "#,
            )
            .bind(NewsStatus::Published)
            .bind(tag_name)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT COUNT(*) as count FROM news WHERE status = $1")
                .bind(NewsStatus::Published)
                .fetch_one(pool)
                .await?
        }
    };

    Ok(row.get::<i64, _>("count"))
}

/// Rewrite every column of an article. The service layer merges partial
/// updates against the current row before calling this.
pub async fn update_news(
    conn: &mut PgConnection,
    news_id: Uuid,
    title: &str,
    content: &str,
    slug: &str,
    status: NewsStatus,
    published_at: Option<DateTime<Utc>>,
    featured_image: Option<&str>,
) -> Result<Option<News>, sqlx::Error> {
    let news = sqlx::query_as::<_, News>(
        r#"
        UPDATE news
        SET title = $1, content = $2, slug = $3, status = $4,
            published_at = $5, featured_image = $6, updated_at = NOW()
        WHERE id = $7
        RETURNING id, title, content, slug, status, featured_image, published_at,
                  created_at, updated_at, view_count, like_count, dislike_count
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(slug)
    .bind(status)
    .bind(published_at)
    .bind(featured_image)
    .bind(news_id)
    .fetch_optional(conn)
    .await?;

    Ok(news)
}

/// Delete an article row. Images and tag associations go with it via the
/// database cascade.
pub async fn delete_news(conn: &mut PgConnection, news_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(news_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Atomically add 1 to one of the article counters. The single UPDATE
/// statement serializes concurrent increments on the same row, so no
/// increment is ever lost.
pub async fn increment_counter(
    pool: &PgPool,
    news_id: Uuid,
    counter: Counter,
) -> Result<Option<News>, sqlx::Error> {
    let sql = match counter {
        Counter::View => {
            r#"
            UPDATE news
            SET view_count = view_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, slug, status, featured_image, published_at,
                      created_at, updated_at, view_count, like_count, dislike_count
            "#
        }
        Counter::Like => {
            r#"
            UPDATE news
            SET like_count = like_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, slug, status, featured_image, published_at,
                      created_at, updated_at, view_count, like_count, dislike_count
            "#
        }
        Counter::Dislike => {
            r#"
            UPDATE news
            SET dislike_count = dislike_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, slug, status, featured_image, published_at,
                      created_at, updated_at, view_count, like_count, dislike_count
            "#
        }
    };

    let news = sqlx::query_as::<_, News>(sql)
        .bind(news_id)
        .fetch_optional(pool)
        .await?;

    Ok(news)
}

/// Set the stored featured-image path for an article
pub async fn set_featured_image(
    conn: &mut PgConnection,
    news_id: Uuid,
    path: &str,
) -> Result<Option<News>, sqlx::Error> {
    let news = sqlx::query_as::<_, News>(
        r#"
        UPDATE news
        SET featured_image = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, title, content, slug, status, featured_image, published_at,
                  created_at, updated_at, view_count, like_count, dislike_count
        "#,
    )
    .bind(path)
    .bind(news_id)
    .fetch_optional(conn)
    .await?;

    Ok(news)
}

/// Tags associated with an article, in insertion order
pub async fn tags_for_news(pool: &PgPool, news_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name
        FROM tags t
        JOIN news_tags nt ON nt.tag_id = t.id
        WHERE nt.news_id = $1
        ORDER BY nt.position
        "#,
    )
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Gallery images of an article, in insertion order
pub async fn images_for_news(pool: &PgPool, news_id: Uuid) -> Result<Vec<NewsImage>, sqlx::Error> {
    let images = sqlx::query_as::<_, NewsImage>(
        r#"
        SELECT id, news_id, image, caption, position
        FROM news_images
        WHERE news_id = $1
        ORDER BY position, id
        "#,
    )
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

/// Replace an article's tag associations with the given list, preserving
/// the order in which ids were submitted.
pub async fn set_tags(
    conn: &mut PgConnection,
    news_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM news_tags WHERE news_id = $1")
        .bind(news_id)
        .execute(&mut *conn)
        .await?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO news_tags (news_id, tag_id, position)
        SELECT $1, t.id, t.ord - 1
        FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(id, ord)
        "#,
    )
    .bind(news_id)
    .bind(tag_ids)
    .execute(conn)
    .await?;

    Ok(())
}

/// Aggregate site statistics over published articles:
/// (total articles, total likes, total dislikes), zero when empty.
pub async fn site_stats(pool: &PgPool) -> Result<(i64, i64, i64), sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as total_news,
               COALESCE(SUM(like_count), 0)::BIGINT as total_likes,
               COALESCE(SUM(dislike_count), 0)::BIGINT as total_dislikes
        FROM news
        WHERE status = $1
        "#,
    )
    .bind(NewsStatus::Published)
    .fetch_one(pool)
    .await?;

    Ok((
        row.get::<i64, _>("total_news"),
        row.get::<i64, _>("total_likes"),
        row.get::<i64, _>("total_dislikes"),
    ))
}
