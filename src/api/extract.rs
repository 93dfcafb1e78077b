use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor that rejects malformed or mistyped payloads with the
/// service's enveloped 400 instead of axum's plain-text reply.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::BadRequest)?;

        let value = serde_json::from_slice::<T>(&bytes).map_err(|err| {
            tracing::debug!("request body rejected: {}", err);
            ApiError::BadRequest
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_well_typed_body() {
        let ApiJson(parsed) = ApiJson::<Payload>::from_request(request("{\"title\": \"Latte\"}"), &())
            .await
            .unwrap();
        assert_eq!(parsed.title, "Latte");
    }

    #[tokio::test]
    async fn rejects_type_mismatch_as_bad_request() {
        let err = ApiJson::<Payload>::from_request(request("{\"title\": 42}"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest));
    }

    #[tokio::test]
    async fn rejects_empty_body_as_bad_request() {
        let err = ApiJson::<Payload>::from_request(request(""), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest));
    }
}
