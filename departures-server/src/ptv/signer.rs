//! Request signing for the PTV timetable API.
//!
//! Every request carries the developer id as `devid` and an HMAC-SHA1 of
//! `path?query` as `signature`. The provider recomputes the digest over the
//! query exactly as sent, so the string we sign and the string we send are
//! both derived from one ordered [`QueryParams`] and never re-sorted.

use std::fmt;

use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::form_urlencoded;

use super::error::PtvError;

type HmacSha1 = Hmac<Sha1>;

const DEVID: &str = "devid";

/// Query parameters in the order they will be serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Order of calls is order on the wire.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builds signed URLs for one set of credentials.
///
/// Cheap to clone and safe to share: the credentials never change after
/// construction.
#[derive(Clone)]
pub struct RequestSigner {
    base_url: String,
    dev_id: String,
    mac: HmacSha1,
}

impl RequestSigner {
    /// Prepare a signer. The key is loaded into the HMAC state once here;
    /// each signature starts from a clone of that state.
    pub fn new(
        base_url: impl Into<String>,
        dev_id: impl Into<String>,
        api_key: &str,
    ) -> Result<Self, PtvError> {
        let mac = HmacSha1::new_from_slice(api_key.as_bytes())
            .map_err(|e| PtvError::InvalidKey(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            dev_id: dev_id.into(),
            mac,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dev_id(&self) -> &str {
        &self.dev_id
    }

    /// Upper-case hex HMAC-SHA1 of `message` under the signing key.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        hex::encode_upper(mac.finalize().into_bytes())
    }

    /// Serialize `params` followed by `devid`, form-urlencoded.
    ///
    /// A `devid` supplied by the caller is dropped so the configured one is
    /// the only one sent.
    ///
    /// # Examples
    ///
    /// ```
    /// use departures_server::ptv::{QueryParams, RequestSigner};
    ///
    /// let signer = RequestSigner::new("https://example.test", "abc", "secret").unwrap();
    /// let params = QueryParams::new()
    ///     .with("max_results", "15")
    ///     .with("direction_id", "1");
    /// assert_eq!(
    ///     signer.query_string(&params),
    ///     "max_results=15&direction_id=1&devid=abc"
    /// );
    /// ```
    pub fn query_string(&self, params: &QueryParams) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().filter(|(k, _)| *k != DEVID))
            .append_pair(DEVID, &self.dev_id)
            .finish()
    }

    /// Build the full signed URL for `path` (which must start with `/`).
    pub fn build_url(&self, path: &str, params: &QueryParams) -> String {
        let query = self.query_string(params);
        let signature = self.sign(&format!("{path}?{query}"));
        format!("{}{path}?{query}&signature={signature}", self.base_url)
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("base_url", &self.base_url)
            .field("dev_id", &self.dev_id)
            .finish_non_exhaustive()
    }
}
