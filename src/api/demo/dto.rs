//! Demo request/response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AgeQuery {
    pub age: i32,
}

#[derive(Debug, Serialize)]
pub struct AgeResponse {
    pub age: i32,
}
