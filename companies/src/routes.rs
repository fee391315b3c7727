use actix_web::{error::QueryPayloadError, web, HttpRequest};

use crate::errors::ToolboxError;
use crate::handlers;

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ToolboxError::invalid("query", err.to_string()).into()
}

/// Register every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(handlers::health_check))
        .route("/industries", web::get().to(handlers::industries))
        .route("/companies", web::get().to(handlers::companies))
        .route("/companies_in_industry", web::get().to(handlers::companies_in_industry))
        .route("/articles_in_month", web::get().to(handlers::articles_in_month))
        .route("/article", web::get().to(handlers::article))
        .route("/companies_in_articles", web::get().to(handlers::companies_in_articles))
        .route("/people_at_company", web::get().to(handlers::people_at_company))
        .service(
            web::scope("/api")
                .route("/toolset", web::get().to(handlers::get_toolset))
                .route("/tool/{name}/invoke", web::post().to(handlers::invoke_tool)),
        );
}
