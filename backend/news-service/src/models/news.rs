use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{NewsImage, Tag};

/// Publication state of an article. Draft articles are hidden from the
/// public listing and from site statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "news_status")]
pub enum NewsStatus {
    Draft,
    Published,
}

impl Default for NewsStatus {
    fn default() -> Self {
        NewsStatus::Draft
    }
}

/// A news article row. Counters and timestamps are server-managed and
/// never accepted from client input.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: NewsStatus,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Wire representation of an article with its related tags and images,
/// both in insertion order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewsDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: NewsStatus,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub tags: Vec<Tag>,
    pub images: Vec<NewsImage>,
}

impl NewsDetail {
    pub fn from_parts(news: News, tags: Vec<Tag>, images: Vec<NewsImage>) -> Self {
        Self {
            id: news.id,
            title: news.title,
            content: news.content,
            slug: news.slug,
            status: news.status,
            featured_image: news.featured_image,
            published_at: news.published_at,
            created_at: news.created_at,
            updated_at: news.updated_at,
            view_count: news.view_count,
            like_count: news.like_count,
            dislike_count: news.dislike_count,
            tags,
            images,
        }
    }
}
