pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod providers;
pub mod ranking;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod taste;

pub use routes::create_router;
pub use state::AppState;
