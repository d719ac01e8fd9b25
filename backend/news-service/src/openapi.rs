/// OpenAPI documentation for the News Service
use utoipa::OpenApi;

use crate::handlers::images::UpdateImageRequest;
use crate::handlers::news::UpdateNewsRequest;
use crate::handlers::stats::StatsResponse;
use crate::handlers::tags::TagRequest;
use crate::models::{News, NewsDetail, NewsImage, NewsStatus, Tag};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "News Service API",
        version = "1.0.0",
        description = "Content-management backend for a news publishing site. Stores news articles, tags, and gallery images, exposes CRUD endpoints with page-number pagination and tag filtering, tracks view/like/dislike counters, and reports aggregate site statistics.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8084", description = "Development server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "news", description = "Article CRUD, counters, featured image upload"),
        (name = "tags", description = "Tag CRUD"),
        (name = "images", description = "Gallery image CRUD"),
        (name = "stats", description = "Aggregate site statistics"),
    ),
    components(schemas(
        News,
        NewsDetail,
        NewsImage,
        NewsStatus,
        Tag,
        TagRequest,
        UpdateNewsRequest,
        UpdateImageRequest,
        StatsResponse,
    )),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
