//! Magnet link view type.

use std::fmt;

use crate::constants::{
    ACCEPTABLE_SOURCE, ADDRESS_TRACKER, DISPLAY_NAME, EXACT_SOURCE, EXTENSION_PREFIX,
    KEYWORD_TOPIC, MANIFEST_TOPIC, WEB_SEED,
};
use crate::error::ParseError;
use crate::fields::{IsExactTopic, IsUriWithKey, ToDecodedValue, ToInfohash, ToProtocol, ToUri};
use crate::filter::FilteredView;
use crate::params::Params;
use crate::pct::EncodedStr;
use crate::rule::MagnetLinkRule;
use crate::uri::UriRef;

/// A view of all exact-topic URNs in a magnet link.
pub type Topics<'a> = FilteredView<Params<'a>, IsExactTopic, ToUri>;

/// A view of all info hashes in a magnet link's exact topics.
pub type InfoHashes<'a> = FilteredView<Params<'a>, IsExactTopic, ToInfohash>;

/// A view of all protocols in a magnet link's exact topics.
pub type Protocols<'a> = FilteredView<Params<'a>, IsExactTopic, ToProtocol>;

/// A view of all nested URIs under one query key, decoded once through a
/// caller-supplied scratch buffer.
pub type UriValues<'a, 'b> = FilteredView<Params<'a>, IsUriWithKey<'b>, ToDecodedValue>;

/// A parsed and validated magnet link.
///
/// Unlike [`UriRef`], which only represents the general URI syntax, a
/// `MagnetLink` exposes the fields that are meaningful to the `magnet`
/// scheme while ignoring elements of the general syntax that the scheme
/// does not use. It wraps the generically-parsed URI and owns no storage;
/// its lifetime is bound to the input it was parsed from.
///
/// A `MagnetLink` can only be obtained through [`MagnetLink::parse`] (or
/// the [`MagnetLinkRule`] it delegates to), which guarantees that the
/// query holds at least one exact topic and that every exact topic's
/// value is itself a valid URI.
///
/// All accessors are lazy views recomputed per call; calling one twice
/// yields element-for-element equal sequences.
///
/// # Examples
///
/// ```
/// use magnet_uri::MagnetLink;
///
/// let link = MagnetLink::parse(
///     "magnet:?xt=urn:btih:d2474e86c95b19b8bcfdb92bc12c9d44667cfa36&dn=Leaves+of+Grass",
/// )
/// .unwrap();
///
/// let hashes: Vec<&str> = link.info_hashes().collect();
/// assert_eq!(hashes, ["d2474e86c95b19b8bcfdb92bc12c9d44667cfa36"]);
/// assert!(link.display_name().unwrap().decoded_eq("Leaves of Grass"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnetLink<'a> {
    uri: UriRef<'a>,
}

impl<'a> MagnetLink<'a> {
    /// Parses a magnet link from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is not a syntactically valid URI
    /// - The scheme is not `magnet`
    /// - No `xt`/`xt.N` parameter is present
    /// - An exact topic's value does not parse as a URI
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        let mut cursor = input;
        MagnetLinkRule.parse(&mut cursor).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    // Only the grammar rule constructs links, after validation.
    pub(crate) const fn from_validated(uri: UriRef<'a>) -> Self {
        Self { uri }
    }

    /// Returns the underlying generically-parsed URI.
    #[must_use]
    pub const fn uri(&self) -> &UriRef<'a> {
        &self.uri
    }

    /// Returns the original link text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.uri.as_str()
    }

    /// URNs of the file or files.
    ///
    /// Exact topics are the one mandatory field of a magnet link: the
    /// query holds one or more of them under the key `xt` (or `xt.1`,
    /// `xt.2`, ...), each naming a file hash and the protocol to access
    /// it. The returned sequence is never empty for a parsed link.
    #[must_use]
    pub fn exact_topics(&self) -> Topics<'a> {
        FilteredView::new(self.params(), IsExactTopic, ToUri)
    }

    /// Info hashes of the exact topics.
    #[must_use]
    pub fn info_hashes(&self) -> InfoHashes<'a> {
        FilteredView::new(self.params(), IsExactTopic, ToInfohash)
    }

    /// Protocols of the exact topics.
    #[must_use]
    pub fn protocols(&self) -> Protocols<'a> {
        FilteredView::new(self.params(), IsExactTopic, ToProtocol)
    }

    /// Tracker URLs used to obtain resources for downloads.
    ///
    /// `buffer` is scratch space for decoding each candidate value once
    /// before its nested parse; entries that fail to decode or parse are
    /// skipped. The returned elements borrow the original input, not the
    /// buffer, so they stay valid as iteration advances.
    #[must_use]
    pub fn address_trackers<'b>(&self, buffer: &'b mut String) -> UriValues<'a, 'b> {
        self.uri_values(ADDRESS_TRACKER, buffer)
    }

    /// Direct download sources for the file.
    ///
    /// See [`Self::address_trackers`] for the buffer contract.
    #[must_use]
    pub fn exact_sources<'b>(&self, buffer: &'b mut String) -> UriValues<'a, 'b> {
        self.uri_values(EXACT_SOURCE, buffer)
    }

    /// Fallback download sources for the file.
    ///
    /// See [`Self::address_trackers`] for the buffer contract.
    #[must_use]
    pub fn acceptable_sources<'b>(&self, buffer: &'b mut String) -> UriValues<'a, 'b> {
        self.uri_values(ACCEPTABLE_SOURCE, buffer)
    }

    /// Links to manifest files that list further magnet links.
    ///
    /// See [`Self::address_trackers`] for the buffer contract.
    #[must_use]
    pub fn manifest_topics<'b>(&self, buffer: &'b mut String) -> UriValues<'a, 'b> {
        self.uri_values(MANIFEST_TOPIC, buffer)
    }

    /// Payload data served over HTTP(S).
    ///
    /// See [`Self::address_trackers`] for the buffer contract.
    #[must_use]
    pub fn web_seed<'b>(&self, buffer: &'b mut String) -> UriValues<'a, 'b> {
        self.uri_values(WEB_SEED, buffer)
    }

    /// Search keywords for P2P networks, e.g. `kt=martin+luther+king+mp3`.
    ///
    /// Absent if the query has no `kt` parameter or it carries no value.
    #[must_use]
    pub fn keyword_topic(&self) -> Option<EncodedStr<'a>> {
        self.decoded_param(KEYWORD_TOPIC)
    }

    /// Filename to display to the user. Only used for convenience.
    ///
    /// Absent if the query has no `dn` parameter or it carries no value.
    #[must_use]
    pub fn display_name(&self) -> Option<EncodedStr<'a>> {
        self.decoded_param(DISPLAY_NAME)
    }

    /// Informal extension parameter.
    ///
    /// Query keys with the prefix `x.` carry options that are guaranteed
    /// to never be standardized; `param("name")` looks up `x.name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use magnet_uri::MagnetLink;
    ///
    /// let link = MagnetLink::parse("magnet:?xt=urn:btih:abc&x.custom=value123").unwrap();
    /// assert!(link.param("custom").unwrap().decoded_eq("value123"));
    /// assert!(link.param("missing").is_none());
    /// ```
    #[must_use]
    pub fn param(&self, key: &str) -> Option<EncodedStr<'a>> {
        self.params().find_map(|p| {
            let mut bytes = p.key.decoded_bytes();
            let matches = EXTENSION_PREFIX.bytes().all(|b| bytes.next() == Some(b))
                && bytes.eq(key.bytes());
            if matches && p.has_value() { p.value } else { None }
        })
    }

    fn params(&self) -> Params<'a> {
        self.uri.query_params()
    }

    // First parameter with the given key, if it carries a value.
    fn decoded_param(&self, key: &str) -> Option<EncodedStr<'a>> {
        self.params().find(|p| p.key.decoded_eq(key))?.value
    }

    fn uri_values<'b>(&self, key: &'b str, buffer: &'b mut String) -> UriValues<'a, 'b> {
        FilteredView::new(self.params(), IsUriWithKey::new(key, buffer), ToDecodedValue)
    }
}

impl fmt::Display for MagnetLink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'a> TryFrom<&'a str> for MagnetLink<'a> {
    type Error = ParseError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MagnetLink<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de: 'a, 'a> serde::Deserialize<'de> for MagnetLink<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: &'de str = serde::Deserialize::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_the_link_text() {
        let link = MagnetLink::parse("magnet:?xt=urn:btih:abc").unwrap();
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, "\"magnet:?xt=urn:btih:abc\"");
    }

    #[test]
    fn deserialization_revalidates() {
        let json = "\"magnet:?dn=foo\"";
        let result: Result<MagnetLink<'_>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
