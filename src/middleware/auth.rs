use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{verifier, AuthError};

/// Permission-gated dispatch wrapper. Each protected route is layered with
/// this middleware carrying the permission string it requires; the decoded
/// claims are injected into request extensions for the handler to consume.
pub async fn authorize(
    State(permission): State<&'static str>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(request.headers())?;
    let claims = verifier().verify(&token, permission).await?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract the bearer credential from the Authorization header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AuthError::InvalidHeader),
    }
}
