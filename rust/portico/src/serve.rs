use std::{path::PathBuf, sync::Arc};

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::PorticoError,
    openapi::OpenApiDocs,
    routes::{
        github_callback, github_login, ping, secure_route, serve_document, ui_service,
        upload_document, user_info,
    },
    FileDocumentStorage, GithubProvider, IdentityProvider, PorticoConfig, TokenKeys,
};

#[derive(Clone)]
pub struct PorticoState {
    pub config: Arc<PorticoConfig>,
    pub keys: TokenKeys,
    pub identity: Arc<dyn IdentityProvider>,
    pub documents: FileDocumentStorage,
}

impl PorticoState {
    pub async fn from_config(config: PorticoConfig) -> Result<Self, PorticoError> {
        let identity = Arc::new(GithubProvider::new(&config)?);
        let documents = FileDocumentStorage::open(&config.uploads_dir).await?;

        Ok(PorticoState {
            keys: TokenKeys::new(config.jwt_secret.as_bytes()),
            config: Arc::new(config),
            identity,
            documents,
        })
    }
}

pub fn router(state: PorticoState) -> Router {
    let ui_dir: PathBuf = state.config.ui_dir.clone();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::CACHE_CONTROL,
        ])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", OpenApiDocs::openapi()))
        .route("/ping", get(ping))
        .route("/swagger.yaml", get(serve_document))
        .route("/auth/github", get(github_login))
        .route("/auth/github/callback", get(github_callback))
        .route("/secure", get(secure_route))
        .route("/user", get(user_info))
        .route("/upload", post(upload_document))
        .fallback_service(ui_service(&ui_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(listener: TcpListener, config: PorticoConfig) -> Result<(), PorticoError> {
    info!(
        "Serving uploads from {} and the web app from {}",
        config.uploads_dir.display(),
        config.ui_dir.display()
    );

    let state = PorticoState::from_config(config).await?;

    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}
