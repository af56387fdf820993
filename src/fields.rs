//! Field predicates and transforms for magnet links.
//!
//! These are the callables composed into the facade's views: predicates
//! decide which query parameters belong to a field, transforms project a
//! kept parameter into the field's element type.

use crate::constants::EXACT_TOPIC;
use crate::filter::{Predicate, Transform};
use crate::params::Param;
use crate::pct::EncodedStr;
use crate::uri::UriRef;

/// Matches exact-topic parameters.
///
/// A parameter is an exact topic if its decoded key is `xt`, or `xt.N`
/// where `N` is one or more ASCII digits. Matching is case-sensitive and
/// exact: `XT`, `xta` and a bare `xt.` do not match.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsExactTopic;

impl Predicate<Param<'_>> for IsExactTopic {
    fn test(&mut self, param: &Param<'_>) -> bool {
        is_exact_topic_key(param.key)
    }
}

fn is_exact_topic_key(key: EncodedStr<'_>) -> bool {
    if key.decoded_eq(EXACT_TOPIC) {
        return true;
    }
    let mut bytes = key.decoded_bytes();
    if bytes.next() != Some(b'x') || bytes.next() != Some(b't') || bytes.next() != Some(b'.') {
        return false;
    }
    let mut any_digit = false;
    for b in bytes {
        if !b.is_ascii_digit() {
            return false;
        }
        any_digit = true;
    }
    any_digit
}

/// Matches parameters with a given key whose value is a nested URI.
///
/// These values are percent-encoded twice: once as a URI of their own and
/// once more as a query value. The predicate decodes one pass into the
/// borrowed scratch buffer and then attempts the nested parse; a decode or
/// parse failure makes the predicate false, so malformed entries are
/// skipped rather than reported.
#[derive(Debug)]
pub struct IsUriWithKey<'b> {
    key: &'b str,
    buf: &'b mut String,
}

impl<'b> IsUriWithKey<'b> {
    /// Binds the predicate to a key literal and a decode scratch buffer.
    #[must_use]
    pub fn new(key: &'b str, buf: &'b mut String) -> Self {
        Self { key, buf }
    }
}

impl Predicate<Param<'_>> for IsUriWithKey<'_> {
    fn test(&mut self, param: &Param<'_>) -> bool {
        if !param.key.decoded_eq(self.key) {
            return false;
        }
        let Some(value) = param.value else {
            return false;
        };
        if value.decode_into(self.buf).is_err() {
            return false;
        }
        UriRef::parse(self.buf).is_ok()
    }
}

/// Projects a parameter's value to a nested [`UriRef`].
///
/// Exact-topic values are only encoded once, so the still-encoded value
/// parses directly. A value that fails to parse yields the empty
/// reference; the grammar rule guarantees this does not happen for
/// parameters of a validated link.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToUri;

impl<'a> Transform<Param<'a>> for ToUri {
    type Output = UriRef<'a>;

    fn apply(&mut self, param: Param<'a>) -> UriRef<'a> {
        UriRef::parse(param.value_or_empty().as_raw()).unwrap_or_default()
    }
}

/// Projects a parameter's value to its decoded text.
///
/// Used where the nested parse already happened in the predicate and the
/// caller wants the once-decoded URI text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToDecodedValue;

impl<'a> Transform<Param<'a>> for ToDecodedValue {
    type Output = EncodedStr<'a>;

    fn apply(&mut self, param: Param<'a>) -> EncodedStr<'a> {
        param.value_or_empty()
    }
}

/// Projects an exact topic to its infohash.
///
/// The topic's value is a URN whose path ends in the hash: the path is
/// split on its *last* colon and the part after it is the hash. A path
/// with no colon is treated as being the hash itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToInfohash;

impl<'a> Transform<Param<'a>> for ToInfohash {
    type Output = &'a str;

    fn apply(&mut self, param: Param<'a>) -> &'a str {
        let path = topic_path(&param);
        match path.rfind(':') {
            Some(i) => &path[i + 1..],
            None => path,
        }
    }
}

/// Projects an exact topic to its protocol chain.
///
/// The counterpart of [`ToInfohash`]: the part of the topic's path before
/// the last colon, e.g. `btih` for `urn:btih:<hash>`. A path with no
/// colon has an empty protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToProtocol;

impl<'a> Transform<Param<'a>> for ToProtocol {
    type Output = &'a str;

    fn apply(&mut self, param: Param<'a>) -> &'a str {
        let path = topic_path(&param);
        match path.rfind(':') {
            Some(i) => &path[..i],
            None => "",
        }
    }
}

fn topic_path<'a>(param: &Param<'a>) -> &'a str {
    UriRef::parse(param.value_or_empty().as_raw())
        .unwrap_or_default()
        .path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    fn param(query: &str) -> Param<'_> {
        Params::new(query).next().unwrap()
    }

    fn exact_topic(query: &str) -> bool {
        IsExactTopic.test(&param(query))
    }

    #[test]
    fn exact_topic_accepts_xt() {
        assert!(exact_topic("xt=urn:btih:abc"));
    }

    #[test]
    fn exact_topic_accepts_numbered_keys() {
        assert!(exact_topic("xt.1=urn:btih:abc"));
        assert!(exact_topic("xt.23=urn:btih:abc"));
    }

    #[test]
    fn exact_topic_accepts_encoded_key() {
        assert!(exact_topic("%78%74=urn:btih:abc"));
    }

    #[test]
    fn exact_topic_rejects_near_misses() {
        assert!(!exact_topic("xt.a=v"));
        assert!(!exact_topic("xt.=v"));
        assert!(!exact_topic("xt.1a=v"));
        assert!(!exact_topic("xta=v"));
        assert!(!exact_topic("XT=v"));
        assert!(!exact_topic("=v"));
    }

    #[test]
    fn uri_with_key_accepts_valid_tracker() {
        let mut buf = String::new();
        let mut pred = IsUriWithKey::new("tr", &mut buf);
        assert!(pred.test(&param("tr=udp%3A%2F%2Ftracker.example.com%3A80")));
        assert_eq!(buf, "udp://tracker.example.com:80");
    }

    #[test]
    fn uri_with_key_rejects_other_keys_and_missing_values() {
        let mut buf = String::new();
        let mut pred = IsUriWithKey::new("tr", &mut buf);
        assert!(!pred.test(&param("ws=udp%3A%2F%2Fa")));
        assert!(!pred.test(&param("tr")));
    }

    #[test]
    fn uri_with_key_rejects_unparseable_values() {
        let mut buf = String::new();
        let mut pred = IsUriWithKey::new("tr", &mut buf);
        assert!(!pred.test(&param("tr=not%20a%20uri")));
        assert!(!pred.test(&param("tr=%ZZ")));
    }

    #[test]
    fn to_uri_parses_topic_value() {
        let mut t = ToUri;
        let uri = t.apply(param("xt=urn:btih:abc"));
        assert_eq!(uri.scheme(), "urn");
        assert_eq!(uri.path(), "btih:abc");
    }

    #[test]
    fn infohash_is_after_the_last_colon() {
        let mut t = ToInfohash;
        assert_eq!(
            t.apply(param("xt=urn:btih:d2474e86c95b19b8bcfdb92bc12c9d44667cfa36")),
            "d2474e86c95b19b8bcfdb92bc12c9d44667cfa36"
        );
    }

    #[test]
    fn protocol_is_before_the_last_colon() {
        let mut t = ToProtocol;
        assert_eq!(t.apply(param("xt=urn:btih:abc")), "btih");
        assert_eq!(t.apply(param("xt=urn:tree:tiger:abc")), "tree:tiger");
    }

    #[test]
    fn infohash_without_colon_is_the_whole_path() {
        let mut t = ToInfohash;
        assert_eq!(t.apply(param("xt=urn:abcdef")), "abcdef");
    }

    #[test]
    fn protocol_without_colon_is_empty() {
        let mut t = ToProtocol;
        assert_eq!(t.apply(param("xt=urn:abcdef")), "");
    }
}
