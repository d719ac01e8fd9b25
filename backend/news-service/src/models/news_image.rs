use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A gallery image owned by exactly one news article. Rows are removed by
/// the database cascade when the owning article is deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct NewsImage {
    pub id: Uuid,
    pub news_id: Uuid,
    pub image: String,
    pub caption: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub position: i32,
}
