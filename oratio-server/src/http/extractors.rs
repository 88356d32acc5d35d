//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use oratio_core::{PrayerDate, ValidationError};

use super::error::ApiError;

/// Extract and parse a record date from path
///
/// A path value that doesn't parse as a date can't match any stored record,
/// so it rejects with 404 rather than 400.
pub struct PathDate(pub PrayerDate);

impl<S> FromRequestParts<S> for PathDate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "date" }))?;

        let date = PrayerDate::parse(&raw).map_err(|_| ApiError::not_found(raw))?;
        Ok(Self(date))
    }
}
