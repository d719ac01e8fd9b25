use actix_cors::Cors;
use actix_web::{middleware::Logger, middleware::NormalizePath, web, App, HttpResponse, HttpServer};
use news_service::handlers;
use news_service::media::MediaStore;
use news_service::openapi::ApiDoc;
use sqlx::postgres::PgPoolOptions;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "news-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "news-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// News Service
///
/// Content-management backend for a news publishing site.
///
/// # Routes
///
/// - `/api/v1/news/*` - Article CRUD, like/dislike/view counters, featured image
/// - `/api/v1/tags/*` - Tag CRUD
/// - `/api/v1/images/*` - Gallery image CRUD
/// - `/api/v1/stats` - Aggregate statistics over published articles
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match news_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting news-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    // Apply pending migrations
    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Migration failed: {:#}", e);
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("migration failed: {e}"),
        ));
    }

    tracing::info!("Connected to database, migrations applied");

    // Media storage root
    tokio::fs::create_dir_all(&config.media.root).await?;
    let media = MediaStore::new(config.media.root.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });
    let media_data = web::Data::new(media);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), openapi_doc.clone()),
            )
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(media_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(NormalizePath::trim())
            .route(
                "/metrics",
                web::get().to(news_service::metrics::serve_metrics),
            )
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/news")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_news))
                                    .route(web::post().to(handlers::create_news)),
                            )
                            .service(
                                web::resource("/{news_id}")
                                    .route(web::get().to(handlers::get_news))
                                    .route(web::put().to(handlers::update_news))
                                    .route(web::patch().to(handlers::update_news))
                                    .route(web::delete().to(handlers::delete_news)),
                            )
                            .route("/{news_id}/like", web::post().to(handlers::like_news))
                            .route("/{news_id}/dislike", web::post().to(handlers::dislike_news))
                            .route("/{news_id}/view", web::post().to(handlers::view_news))
                            .route(
                                "/{news_id}/featured_image",
                                web::post().to(handlers::upload_featured_image),
                            ),
                    )
                    .service(
                        web::scope("/tags")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_tags))
                                    .route(web::post().to(handlers::create_tag)),
                            )
                            .service(
                                web::resource("/{tag_id}")
                                    .route(web::get().to(handlers::get_tag))
                                    .route(web::put().to(handlers::update_tag))
                                    .route(web::patch().to(handlers::update_tag))
                                    .route(web::delete().to(handlers::delete_tag)),
                            ),
                    )
                    .service(
                        web::scope("/images")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_images))
                                    .route(web::post().to(handlers::upload_image)),
                            )
                            .service(
                                web::resource("/{image_id}")
                                    .route(web::get().to(handlers::get_image))
                                    .route(web::put().to(handlers::update_image))
                                    .route(web::patch().to(handlers::update_image))
                                    .route(web::delete().to(handlers::delete_image)),
                            ),
                    )
                    .route("/stats", web::get().to(handlers::get_stats)),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
