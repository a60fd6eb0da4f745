//! Backend entry-point: wires REST endpoints, health probes, and OpenAPI docs.

use actix_web::{App, HttpServer, web};
use ortho_config::OrthoConfig as _;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::outbound::persistence::DbPool;
use backend::server::config::AppSettings;
use backend::server::{api_scope, build_http_state};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()?;
    let pool = DbPool::connect(&settings.database_url, settings.db_pool_size).await?;
    let state = web::Data::new(build_http_state(pool, settings.jwt_settings()));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .service(api_scope())
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(settings.bind_addr.as_str())?;

    health_state.mark_ready();
    server.run().await?;
    Ok(())
}
