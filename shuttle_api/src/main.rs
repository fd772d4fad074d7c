mod docs;
mod error;
mod health;
mod optimize;
mod routes;
mod state;
#[cfg(test)]
mod test_utils;

use crate::docs::{API_TITLE, docs_routes};
use crate::routes::api_routes;
use crate::state::AppState;
use aide::openapi::OpenApi;
use aide::transform::TransformOpenApi;
use anyhow::Context;
use axum::http::Method;
use axum::{Extension, serve};
use shuttle_dispatch::config::DispatchConfig;
use shuttle_dispatch::dispatcher::Dispatcher;
use shuttle_route_optimization::credentials::ServiceAccountCredentials;
use shuttle_route_optimization::route_optimization_client::{
    ClientParams, RouteOptimizationClient,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const ADDRESS_ENV_VAR: &str = "SHUTTLE_API_ADDRESS";
const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    aide::generate::on_error(|error| tracing::error!("{}", error));
    aide::generate::extract_schemas(true);

    let credentials =
        ServiceAccountCredentials::from_env().context("Google credentials are required")?;
    let client = RouteOptimizationClient::new(credentials, ClientParams::from_env()?)?;
    let config = DispatchConfig::from_env()?;

    info!(?config, endpoint = %client.endpoint(), "Starting shuttle dispatch API");

    let state = Arc::new(AppState {
        dispatcher: Dispatcher::new(config, client),
    });

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    let mut api = OpenApi::default();

    let app = aide::axum::ApiRouter::new()
        .nest_api_service("/docs", docs_routes())
        .merge(api_routes(state))
        .finish_api_with(&mut api, api_docs);

    if std::env::args().any(|a| a == "--generate-openapi") {
        let spec = serde_json::to_string_pretty(&api)?;
        std::fs::write("schemas/openapi.json", spec)?;
        info!("OpenAPI specification has been written to openapi.json");
        return Ok(());
    }

    let app = app
        .layer(ServiceBuilder::new().layer(cors_layer))
        .layer(Extension(Arc::new(api)));

    let address = std::env::var(ADDRESS_ENV_VAR).unwrap_or_else(|_| DEFAULT_ADDRESS.to_owned());
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("Listening on {}", address);

    serve(listener, app).await?;

    Ok(())
}

fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title(API_TITLE)
}
