pub mod handlers;
pub mod middleware;
pub mod routers;
pub mod server;

pub use routers::routes;
