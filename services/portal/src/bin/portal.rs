//! services/portal/src/bin/portal.rs

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use campus_core::ports::{FacultyService, HodService};
use portal_lib::{
    adapters::{
        BackendClient, CampusDatasets, DemoFacultyAdapter, DemoHodAdapter, FileSettingsStore,
        HttpFacultyAdapter, HttpHodAdapter,
    },
    config::Config,
    error::PortalError,
    web::{self, docs::ApiDoc, state::AppState},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), PortalError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(demo = config.demo_mode(), "Configuration loaded. Starting server...");

    // --- 2. Choose the Campus Backend ---
    let (faculty, hod): (Arc<dyn FacultyService>, Arc<dyn HodService>) =
        match &config.campus_api_url {
            Some(url) => {
                info!("Using campus backend at {}", url);
                let client = reqwest::Client::builder().build()?;
                let backend = BackendClient::new(client, url, config.campus_api_token.clone())?;
                let faculty: Arc<dyn FacultyService> =
                    Arc::new(HttpFacultyAdapter::new(backend.clone()));
                let hod: Arc<dyn HodService> =
                    Arc::new(HttpHodAdapter::new(backend, config.hod_department.clone()));
                (faculty, hod)
            }
            None => {
                warn!("CAMPUS_API_URL is not set; serving the bundled demo data");
                let faculty: Arc<dyn FacultyService> = Arc::new(DemoFacultyAdapter::seeded()?);
                let hod: Arc<dyn HodService> = Arc::new(DemoHodAdapter::seeded()?);
                (faculty, hod)
            }
        };

    // --- 3. Local Stores ---
    let settings = Arc::new(FileSettingsStore::new(config.settings_dir.clone()));
    info!("Settings are stored under {}", settings.dir().display());
    let campus = CampusDatasets::seeded()?;

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        faculty,
        hod,
        settings,
        campus,
    });

    let origin = config.frontend_origin.parse::<HeaderValue>().map_err(|e| {
        PortalError::Internal(format!(
            "Invalid FRONTEND_ORIGIN '{}': {}",
            config.frontend_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let app = Router::new()
        .merge(web::router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
