use std::env;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use velora::app;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let database_url =
        env::var("DATABASE_URL").expect("Env variable `DATABASE_URL` should be set");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let port = env::var("PORT").unwrap_or_else(|_| "8090".to_string());
    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind server port");
    info!("Server starting at http://0.0.0.0:{port}");

    axum::serve(listener, app(db_pool).into_make_service())
        .await
        .expect("Server crashed");
}

/// Plain env-filtered output in development, bunyan-formatted JSON lines in
/// production (`APP_ENV=production`).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "velora=debug,tower_http=info".into());

    let app_env = env::var("APP_ENV")
        .unwrap_or_else(|_| "development".to_string())
        .to_ascii_lowercase();

    if app_env == "production" {
        let formatting_layer = BunyanFormattingLayer::new("velora".into(), std::io::stdout);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(formatting_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
