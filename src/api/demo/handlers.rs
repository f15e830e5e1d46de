//! /demo handlers.
//!
//! Responsibility:
//! - Each handler shows one slice of the stack: plain text, query parsing,
//!   JSON responses, token-derived identity
//! - Query parsing failures map to a structured 400, not axum's default
//!   rejection

use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
};

use crate::api::demo::dto::{AgeQuery, AgeResponse};
use crate::api::extractors::PrincipalExtractor;
use crate::error::AppError;

pub async fn hello() -> &'static str {
    "Hello from the demo API!"
}

pub async fn age(query: Result<Query<AgeQuery>, QueryRejection>) -> Result<Json<i32>, AppError> {
    let Query(query) =
        query.map_err(|_| AppError::bad_request("INVALID_AGE", "invalid or missing age"))?;

    // saturate rather than overflow near i32::MAX
    Ok(Json(query.age.saturating_add(10)))
}

pub async fn age_object(
    query: Result<Query<AgeQuery>, QueryRejection>,
) -> Result<Json<AgeResponse>, AppError> {
    let Query(query) =
        query.map_err(|_| AppError::bad_request("INVALID_AGE", "invalid or missing age"))?;

    Ok(Json(AgeResponse {
        age: query.age.saturating_add(10),
    }))
}

pub async fn token_uuid_version(
    PrincipalExtractor(principal): PrincipalExtractor,
) -> Json<usize> {
    Json(principal.id().get_version_num())
}
