pub mod container;
pub mod controller;
pub mod error;
pub mod router;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use error::ApiError;
pub use router::{build_router, CHAT_ROUTE};
pub use server::serve;
