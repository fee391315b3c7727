pub mod errors;
pub mod graph_db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub const SERVICE_NAME: &str = "companies-toolbox";
