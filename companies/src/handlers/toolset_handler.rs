use actix_web::{web, HttpRequest, HttpResponse};
use toolbox_observability::get_trace_context;

use crate::errors::{ToolboxError, ToolboxResult};
use crate::services::{toolset, Operation, QueryFacade, QueryParams};

/// Describe every operation so agents can register them as tools.
pub async fn get_toolset() -> HttpResponse {
    HttpResponse::Ok().json(toolset())
}

/// Call an operation by tool name with a JSON object of parameters.
/// An empty body means no parameters.
pub async fn invoke_tool(
    req: HttpRequest,
    facade: web::Data<QueryFacade>,
    name: web::Path<String>,
    body: web::Bytes,
) -> ToolboxResult<HttpResponse> {
    let name = name.into_inner();
    let operation =
        Operation::from_name(&name).ok_or_else(|| ToolboxError::UnknownOperation(name.clone()))?;

    let params = if body.iter().all(u8::is_ascii_whitespace) {
        QueryParams::new()
    } else {
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| ToolboxError::invalid("body", e.to_string()))?;
        QueryParams::from_json(&value)?
    };

    tracing::info!(
        tool = operation.name(),
        trace_id = %get_trace_context(&req).trace_id,
        "Invoking tool"
    );

    Ok(HttpResponse::Ok().json(facade.invoke(operation, &params).await?))
}
