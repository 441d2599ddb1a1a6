//! TOML manifest decoding.
use serde::de::DeserializeOwned;

use crate::error::{BootstrapError, ManifestError};
use crate::remote::Remote;

/// Decode raw manifest bytes into `T`.
///
/// `name` identifies the manifest in error messages (e.g. `config.toml`).
///
/// # Errors
///
/// Returns an error if `bytes` is not UTF-8 or not valid TOML for `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], name: &str) -> Result<T, ManifestError> {
    let text = std::str::from_utf8(bytes).map_err(|source| ManifestError::Encoding {
        name: name.to_string(),
        source,
    })?;
    toml::from_str(text).map_err(|source| ManifestError::Toml {
        name: name.to_string(),
        source,
    })
}

/// Fetch `url` and decode the body as the manifest `name`.
///
/// # Errors
///
/// Returns an error if the fetch or the decode fails.
pub fn fetch_manifest<T: DeserializeOwned>(
    remote: &dyn Remote,
    url: &str,
    name: &str,
) -> Result<T, BootstrapError> {
    let bytes = remote.fetch(url)?;
    tracing::debug!("fetched {name} ({} bytes)", bytes.len());
    Ok(decode(&bytes, name)?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::remote::MockRemote;
    use std::collections::BTreeMap;

    #[test]
    fn decode_table() {
        let table: BTreeMap<String, String> = decode(b"a = \"1\"\nb = \"2\"\n", "t.toml").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn decode_invalid_utf8() {
        let err = decode::<BTreeMap<String, String>>(&[0xff, 0xfe], "bad.toml").unwrap_err();
        assert!(matches!(err, ManifestError::Encoding { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn decode_invalid_toml_names_manifest() {
        let err = decode::<BTreeMap<String, String>>(b"[unterminated", "packages.toml").unwrap_err();
        assert!(matches!(err, ManifestError::Toml { .. }));
        assert!(err.to_string().contains("packages.toml"));
    }

    #[test]
    fn fetch_manifest_propagates_fetch_error() {
        let mut remote = MockRemote::new();
        remote.expect_fetch().returning(|url| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });
        let err = fetch_manifest::<BTreeMap<String, String>>(&remote, "https://x/c.toml", "c.toml")
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Fetch(_)));
    }

    #[test]
    fn fetch_manifest_decodes_body() {
        let mut remote = MockRemote::new();
        remote
            .expect_fetch()
            .withf(|url| url == "https://x/c.toml")
            .returning(|_| Ok(b"k = \"v\"".to_vec()));
        let table: BTreeMap<String, String> =
            fetch_manifest(&remote, "https://x/c.toml", "c.toml").unwrap();
        assert_eq!(table.get("k").map(String::as_str), Some("v"));
    }
}
