pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export the types most callers need
pub use error::AppError;
pub use state::AppState;
