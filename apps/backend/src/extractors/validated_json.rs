use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest JSON body a handler will accept.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// JSON body extractor whose failures render as problem details.
///
/// A body that does not parse into `T` becomes a 400 with the stable
/// `INVALID_JSON` code; serde's raw message stays out of the response so
/// request payloads never echo back to the client.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "request body read failed");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            match serde_json::from_slice::<T>(&body) {
                Ok(parsed) => Ok(ValidatedJson(parsed)),
                Err(e) => {
                    debug!(
                        trace_id = %trace_id,
                        error = %Redacted(&e.to_string()),
                        body_size = body.len(),
                        "JSON body rejected"
                    );
                    Err(AppError::bad_request(
                        ErrorCode::InvalidJson,
                        describe_parse_error(&e),
                    ))
                }
            }
        })
    }
}

/// Turn a serde_json error into a client-safe description.
fn describe_parse_error(error: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match error.classify() {
        Category::Syntax => format!("Malformed JSON at line {}", error.line()),
        Category::Eof => "Malformed JSON: body ended early".to_string(),
        Category::Data => "JSON fields are missing or have the wrong shape".to_string(),
        Category::Io => "Could not read JSON body".to_string(),
    }
}
