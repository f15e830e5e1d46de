pub mod issuer;
pub mod verifier;

pub use issuer::TokenIssuer;
pub use verifier::{Principal, TokenVerifier, VerifyError};
