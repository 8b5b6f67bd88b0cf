// document-backend/src/api/mod.rs

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::HasJwtManager;
use crate::middleware::cors::cors_layer;
use crate::service::{
    access_service::AccessService, approval_service::ApprovalService,
    document_service::DocumentService, folder_service::FolderService,
};
use crate::store::{DocumentStore, FileStorage};
use crate::utils::jwt::JwtManager;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub document_service: Arc<DocumentService>,
    pub approval_service: Arc<ApprovalService>,
    pub access_service: Arc<AccessService>,
    pub folder_service: Arc<FolderService>,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// 保存先とファイルストレージからサービス群を組み立てる
    pub fn new(
        store: Arc<dyn DocumentStore>,
        files: Arc<dyn FileStorage>,
        jwt_manager: Arc<JwtManager>,
        config: &AppConfig,
    ) -> Self {
        let access_service = Arc::new(AccessService::new(store.clone(), &config.share));
        let approval_service = Arc::new(ApprovalService::new(
            store.clone(),
            access_service.clone(),
            &config.approval,
        ));
        let document_service = Arc::new(DocumentService::new(
            store.clone(),
            files,
            approval_service.clone(),
            access_service.clone(),
        ));
        let folder_service = Arc::new(FolderService::new(store));

        Self {
            document_service,
            approval_service,
            access_service,
            folder_service,
            jwt_manager,
            config: Arc::new(config.clone()),
        }
    }
}

impl HasJwtManager for AppState {
    fn jwt_manager(&self) -> &Arc<JwtManager> {
        &self.jwt_manager
    }
}

/// 全ルーターを統合し、共通レイヤーを適用する
pub fn app_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();

    Router::new()
        .merge(handlers::health::health_router())
        .merge(handlers::document_handler::document_router(app_state.clone()))
        .merge(handlers::approval_handler::approval_router(app_state.clone()))
        .merge(handlers::share_handler::share_router(app_state.clone()))
        .merge(handlers::folder_handler::folder_router(app_state))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(DefaultBodyLimit::max(config.server.body_limit))
        .layer(cors_layer(&config))
}
