//! URL normalization collaborator.
//!
//! Link and image targets pass through here before being embedded. The
//! normalizer never fails a render: anything the `url` crate cannot
//! parse (relative references, fragments on their own) is returned
//! verbatim.

use url::Url;

/// Canonical form of `raw`: parsed and re-serialized when absolute,
/// otherwise unchanged.
pub fn normalize(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.to_string(),
        Err(_) => raw.to_string(),
    }
}
