pub mod entities;
pub mod records;
pub mod role;

pub use entities::*;
pub use records::*;
pub use role::{Role, ROLE_EDGE_PREFIX};
