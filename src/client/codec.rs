//! JSON request bodies and response decoding.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::client::error::{ClientError, ClientResult};
use crate::models::ErrorResponse;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Encodes `value` as a JSON request body.
pub fn create_body_from_struct<T: Serialize + ?Sized>(value: &T) -> ClientResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(ClientError::Encode)
}

/// A request carrying `body` as JSON.
pub fn build_data_request<T: Serialize + ?Sized>(method: Method, url: Url, body: &T) -> ClientResult<Request> {
    let bytes = create_body_from_struct(body)?;

    let mut request = Request::new(method, url);
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    *request.body_mut() = Some(bytes.into());

    Ok(request)
}

/// Decodes a response body according to its status.
///
/// Statuses of 400 and above are read as an [`ErrorResponse`] envelope and surfaced as
/// [`ClientError::Api`]. Anything else is decoded into `T`.
pub fn unmarshal_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    if status >= 400 {
        return Err(decode_error_envelope(body));
    }

    serde_json::from_slice(body).map_err(|e| ClientError::decode(e, body))
}

pub(crate) fn decode_error_envelope(body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(envelope) => ClientError::Api(envelope),
        Err(e) => ClientError::decode(e, body),
    }
}
