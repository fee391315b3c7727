pub mod health;
pub mod query_handler;
pub mod toolset_handler;

pub use health::*;
pub use query_handler::*;
pub use toolset_handler::*;
