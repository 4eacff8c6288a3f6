//! Search strategies built on a [`Geocoder`].

use super::Geocoder;
use super::error::GeocodeError;
use super::types::PlaceCandidate;

/// Queries shorter than this produce no suggestions.
pub const MIN_SUGGEST_QUERY_LEN: usize = 3;

/// Number of comma-separated parts kept by [`shorten_place_name`].
const SHORT_NAME_PARTS: usize = 3;

/// Shorten a provider display name to its first three parts.
///
/// ```
/// use trip_server::geocode::shorten_place_name;
///
/// assert_eq!(
///     shorten_place_name("India Gate, Rajpath, New Delhi, Delhi, 110001, India"),
///     "India Gate, Rajpath, New Delhi"
/// );
/// assert_eq!(shorten_place_name("Pune"), "Pune");
/// ```
pub fn shorten_place_name(name: &str) -> String {
    name.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(SHORT_NAME_PARTS)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Autocomplete suggestions for a partially typed place.
///
/// Returns nothing for short queries without calling the geocoder.
pub async fn suggest_places(
    geocoder: &dyn Geocoder,
    query: &str,
    country: &str,
) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let query = query.trim();
    if query.chars().count() < MIN_SUGGEST_QUERY_LEN {
        return Ok(Vec::new());
    }

    geocoder.search_places(&with_country(query, country)).await
}

/// Find the best match for a destination typed by the user.
///
/// Tries progressively looser queries and returns the first result of the
/// first query that finds anything. Failed attempts are skipped; the last
/// error is returned only if every attempt failed.
pub async fn search_destination(
    geocoder: &dyn Geocoder,
    query: &str,
    country: &str,
) -> Result<Option<PlaceCandidate>, GeocodeError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(GeocodeError::EmptyQuery);
    }

    let attempts = [
        with_country(query, country),
        query.to_string(),
        with_country(&format!("pincode {query}"), country),
    ];

    let mut last_error = None;
    let mut any_succeeded = false;
    for attempt in &attempts {
        match geocoder.search_places(attempt).await {
            Ok(results) => {
                any_succeeded = true;
                if let Some(first) = results.into_iter().next() {
                    return Ok(Some(first));
                }
            }
            Err(e) => {
                tracing::warn!(query = %attempt, error = %e, "destination search attempt failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !any_succeeded => Err(e),
        _ => Ok(None),
    }
}

fn with_country(query: &str, country: &str) -> String {
    if country.is_empty() {
        query.to_string()
    } else {
        format!("{query}, {country}")
    }
}
