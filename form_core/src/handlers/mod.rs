pub mod api;
pub mod health;
pub mod page;
pub mod routes;

pub use routes::create_routes;
