pub mod operations;
pub mod params;
pub mod query_service;

pub use operations::{toolset, Operation, ParameterSpec, ToolDescription, Toolset};
pub use params::QueryParams;
pub use query_service::{QueryFacade, ROW_CAP};
