use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use companies_toolbox::graph_db::{GraphStore, Neo4jStore};
use companies_toolbox::services::QueryFacade;
use companies_toolbox::{routes, SERVICE_NAME};
use toolbox_config::AppConfig;
use toolbox_observability::{init_tracing, observability, ObservabilityConfig, TracingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(TracingConfig::for_service(SERVICE_NAME));

    let store = Neo4jStore::connect(&config.neo4j)
        .await
        .with_context(|| format!("failed to connect to Neo4j at {}", config.neo4j.uri))?;
    tracing::info!(uri = store.uri(), database = store.database(), "Graph store ready");
    let store: Arc<dyn GraphStore> = Arc::new(store);
    let facade = web::Data::new(QueryFacade::new(store));

    let slow_ms = config.server.slow_request_ms;
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(facade.clone())
            .wrap(observability(
                ObservabilityConfig::for_service(SERVICE_NAME).with_slow_threshold(slow_ms),
            ))
            .configure(routes::configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting {}",
        SERVICE_NAME
    );
    server
        .bind((config.server.host.as_str(), config.server.port))
        .with_context(|| format!("failed to bind {}:{}", config.server.host, config.server.port))?
        .run()
        .await?;

    tracing::info!("Shutting down {}", SERVICE_NAME);
    Ok(())
}
