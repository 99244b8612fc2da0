use axum::{
    extract::{FromRequest, Request},
    Json,
};

use crate::error::HuntError;

/// JSON body extractor whose rejections use the crate's error shape.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = HuntError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let message = format!("malformed request body: {}", rejection.body_text());
                tracing::warn!("{}", message);
                Err(HuntError::Validation(message))
            }
        }
    }
}
