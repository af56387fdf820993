//! Property-based tests validating the magnet link grammar.
//!
//! These tests generate random grammar-valid links and verify the parser
//! accepts them and that the view invariants hold, ensuring parser-grammar
//! conformance.

use proptest::prelude::*;

use magnet_uri::{MagnetLink, ParseErrorKind, UriRef};

/// Strategies for generating valid grammar-conformant inputs.
mod strategies {
    use super::*;

    /// Lowercase hex alphabet for info hashes
    const HEX: &[u8] = b"0123456789abcdef";

    /// Valid characters for host labels and keywords
    const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

    /// Generate a 40-hex-char v1 info hash
    pub fn info_hash() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(HEX.to_vec()), 40)
            .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
    }

    /// Generate a lowercase word (1-10 chars)
    pub fn word() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(LOWERCASE.to_vec()), 1..=10)
            .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
    }

    /// Generate a display name of words joined by '+'
    pub fn display_name() -> impl Strategy<Value = String> {
        prop::collection::vec(word(), 1..=4).prop_map(|words| words.join("+"))
    }

    /// Generate a plain (not yet query-encoded) tracker URL
    pub fn tracker_url() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["udp", "http", "https"]),
            prop::collection::vec(word(), 1..=3),
            1u16..=65535,
        )
            .prop_map(|(scheme, labels, port)| {
                format!("{scheme}://{host}:{port}", host = labels.join("."))
            })
    }

    /// Percent-encode a URL for embedding as a query value.
    pub fn encode(url: &str) -> String {
        let mut out = String::with_capacity(url.len() * 2);
        for c in url.chars() {
            match c {
                ':' => out.push_str("%3A"),
                '/' => out.push_str("%2F"),
                c => out.push(c),
            }
        }
        out
    }

    /// Generate the parts of a valid magnet link plus its rendered text.
    pub fn magnet_link()
    -> impl Strategy<Value = (String, Vec<String>, Option<String>, Vec<String>)> {
        (
            prop::collection::vec(info_hash(), 1..=3),
            prop::option::of(display_name()),
            prop::collection::vec(tracker_url(), 0..=3),
        )
            .prop_map(|(hashes, name, trackers)| {
                let mut text = String::from("magnet:?");
                for (i, hash) in hashes.iter().enumerate() {
                    if i > 0 {
                        text.push('&');
                    }
                    if i == 0 {
                        text.push_str("xt=");
                    } else {
                        text.push_str(&format!("xt.{i}="));
                    }
                    text.push_str("urn:btih:");
                    text.push_str(hash);
                }
                if let Some(name) = &name {
                    text.push_str("&dn=");
                    text.push_str(name);
                }
                for tracker in &trackers {
                    text.push_str("&tr=");
                    text.push_str(&encode(tracker));
                }
                (text, hashes, name, trackers)
            })
    }
}

proptest! {
    #[test]
    fn generated_links_are_accepted((text, hashes, _, _) in strategies::magnet_link()) {
        let link = MagnetLink::parse(&text).unwrap();
        prop_assert_eq!(link.as_str(), text.as_str());
        prop_assert_eq!(link.exact_topics().count(), hashes.len());
    }

    #[test]
    fn every_exact_topic_reparses((text, _, _, _) in strategies::magnet_link()) {
        let link = MagnetLink::parse(&text).unwrap();
        for topic in link.exact_topics() {
            prop_assert_eq!(UriRef::parse(topic.as_str()).unwrap(), topic);
        }
    }

    #[test]
    fn info_hashes_match_the_generated_hashes((text, hashes, _, _) in strategies::magnet_link()) {
        let link = MagnetLink::parse(&text).unwrap();
        let found: Vec<&str> = link.info_hashes().collect();
        prop_assert_eq!(found, hashes.iter().map(String::as_str).collect::<Vec<_>>());
        for protocol in link.protocols() {
            prop_assert_eq!(protocol, "btih");
        }
    }

    #[test]
    fn trackers_roundtrip((text, _, _, trackers) in strategies::magnet_link()) {
        let link = MagnetLink::parse(&text).unwrap();
        let mut buf = String::new();
        let found: Vec<String> = link
            .address_trackers(&mut buf)
            .map(|t| t.to_string())
            .collect();
        prop_assert_eq!(found, trackers);
    }

    #[test]
    fn accessors_are_idempotent((text, _, _, _) in strategies::magnet_link()) {
        let link = MagnetLink::parse(&text).unwrap();
        let first: Vec<&str> = link.info_hashes().collect();
        let second: Vec<&str> = link.info_hashes().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn display_name_survives_the_trip((text, _, name, _) in strategies::magnet_link()) {
        let link = MagnetLink::parse(&text).unwrap();
        match name {
            Some(name) => {
                let decoded = link.display_name().unwrap().to_string();
                prop_assert_eq!(decoded, name.replace('+', " "));
            }
            None => prop_assert!(link.display_name().is_none()),
        }
    }

    #[test]
    fn links_without_exact_topics_are_rejected(name in strategies::display_name()) {
        let err = MagnetLink::parse(&format!("magnet:?dn={name}")).unwrap_err();
        prop_assert_eq!(err.kind, ParseErrorKind::MissingExactTopic);
    }

    #[test]
    fn other_schemes_are_rejected(hash in strategies::info_hash()) {
        let err = MagnetLink::parse(&format!("http:?xt=urn:btih:{hash}")).unwrap_err();
        prop_assert!(matches!(err.kind, ParseErrorKind::InvalidScheme { .. }), "expected InvalidScheme error");
    }
}
