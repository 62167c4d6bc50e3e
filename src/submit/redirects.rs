//! Redirect handling for the POST-then-GET protocol.

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::StatusCode;
use url::Url;

/// Returns the URL to GET after a POST, if the response is a redirect to follow.
///
/// Only `302 Found` and `303 See Other` qualify; both turn the POST into a GET.
/// A relative `Location` is resolved against `base`, the URL that was posted to.
/// A redirect without a usable `Location` yields `None` and is treated as a
/// plain non-2xx response by the caller.
pub fn redirect_target(status: StatusCode, headers: &HeaderMap, base: &Url) -> Option<Url> {
    if status != StatusCode::FOUND && status != StatusCode::SEE_OTHER {
        return None;
    }

    let Some(location) = headers.get(LOCATION) else {
        log::warn!("Redirect status {} from {} but no Location header", status.as_u16(), base);
        return None;
    };
    let Ok(location) = location.to_str() else {
        log::warn!("Redirect from {} has a non-ASCII Location header", base);
        return None;
    };

    match Url::parse(location).or_else(|_| base.join(location)) {
        Ok(target) => Some(target),
        Err(e) => {
            log::warn!("Redirect from {} has an invalid Location {:?}: {}", base, location, e);
            None
        }
    }
}
