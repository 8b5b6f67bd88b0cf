// document-backend/src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use document_backend::api::{app_router, AppState};
use document_backend::config::{AppConfig, JwtConfig, StorageConfig};
use document_backend::db::{create_db_pool, run_migrations};
use document_backend::store::{file_storage::create_file_storage, SeaOrmDocumentStore};
use document_backend::utils::jwt::JwtManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "document_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Document Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let storage_config = StorageConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        strict_sequential = app_config.approval.strict_sequential,
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.auto_migrate {
        run_migrations(&db_pool).await?;
        tracing::info!("Migrations applied.");
    }

    let store = Arc::new(SeaOrmDocumentStore::new(db_pool));
    let files = create_file_storage(storage_config);
    let jwt_manager = Arc::new(JwtManager::new(jwt_config));

    let app_state = AppState::new(store, files, jwt_manager, &app_config);
    let app = app_router(app_state);

    // サーバーの起動
    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
