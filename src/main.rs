use std::sync::Arc;

use course_catalog::api::router;
use course_catalog::config::AppConfig;
use course_catalog::db::{CourseCache, SqliteKeyValue};
use course_catalog::remote::{CourseRemote, HttpCourseRemote};
use course_catalog::state::AppState;
use course_catalog::store::CourseStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_catalog=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let kv = SqliteKeyValue::connect(&config.database_url, config.max_connections).await?;
    let cache = CourseCache::new(Arc::new(kv), config.storage_key.clone());

    let remote: Option<Arc<dyn CourseRemote>> = match config.remote.clone() {
        Some(remote_config) => {
            info!("using remote course service at {}", remote_config.base_url);
            let remote = HttpCourseRemote::new(remote_config)?;
            Some(Arc::new(remote) as Arc<dyn CourseRemote>)
        }
        None => {
            info!("no remote course service configured");
            None
        }
    };

    let courses = CourseStore::open(cache, remote).await;
    info!(
        "catalog ready with {} courses (source: {:?})",
        courses.snapshot().len(),
        courses.load_source()
    );

    let app = router(AppState { courses });

    info!("listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
