pub mod bearer_auth;
pub mod cors;
pub mod http;
