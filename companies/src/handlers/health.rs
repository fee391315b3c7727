use actix_web::{web, HttpResponse};

use crate::services::QueryFacade;
use crate::SERVICE_NAME;

pub async fn health_check(facade: web::Data<QueryFacade>) -> HttpResponse {
    match facade.store().ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "graph_store": "up",
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Graph store health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "degraded",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
                "graph_store": "down",
            }))
        }
    }
}
