//! Locale negotiation.

use http::HeaderMap;
use http::header::ACCEPT_LANGUAGE;

/// Primary language of the first `Accept-Language` tag, lowercased.
///
/// `fr-CA,fr;q=0.9,en;q=0.5` → `fr`. Quality values are not weighed; a
/// missing header, `*` or an unreadable value yields `None` so the
/// validator's default applies.
pub fn request_locale(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(ACCEPT_LANGUAGE)?.to_str().ok()?;
    let first = header.split(',').next()?;
    let tag = first.split(';').next()?.trim();
    let primary = tag.split(['-', '_']).next()?.trim();
    if primary.is_empty() || primary == "*" {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}
