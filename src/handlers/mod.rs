pub mod companion;
pub mod dashboard;
pub mod health;
pub mod moods;
pub mod music;
pub mod reports;
pub mod routines;
pub mod tips;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap},
    Json,
};
use chrono::NaiveDate;

use crate::error::AppResult;

/// Calendar day in the server's local timezone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// JSON body that may be left out entirely.
///
/// A request without a body and without a content type gets the defaults.
/// Anything sent that fails to parse is rejected.
pub fn optional_json<T: Default>(
    headers: &HeaderMap,
    body: Result<Json<T>, JsonRejection>,
) -> AppResult<T> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_))
            if !headers.contains_key(header::CONTENT_TYPE) =>
        {
            Ok(T::default())
        }
        Err(rejection) => Err(rejection.into()),
    }
}
