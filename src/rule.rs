//! Second-pass grammar rule for magnet links.

use crate::constants::SCHEME;
use crate::error::ParseErrorKind;
use crate::fields::IsExactTopic;
use crate::filter::Predicate;
use crate::link::MagnetLink;
use crate::uri::UriRef;

/// Rule matching a magnet link.
///
/// The rule runs after (and delegates to) the generic URI grammar: phase
/// one parses the input as an absolute URI, phase two walks the query
/// parameters and enforces the scheme-specific invariants: the scheme is
/// `magnet`, at least one exact topic is present, and every exact topic's
/// value parses as a URI of its own. Parameters other than exact topics
/// are not validated here; they are filtered lazily by the view accessors.
///
/// The cursor form composes with larger grammars: on acceptance the
/// cursor advances past the consumed text, on rejection its position is
/// unspecified and callers must not rely on partial consumption.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagnetLinkRule;

impl MagnetLinkRule {
    /// Parses a magnet link from the text at the cursor, advancing the
    /// cursor past the consumed input on success.
    ///
    /// # Errors
    ///
    /// Returns `ParseErrorKind` if the input is not a valid URI, the
    /// scheme is not `magnet`, no exact topic is present, or an exact
    /// topic's value is not itself a valid URI.
    pub fn parse<'a>(&self, cursor: &mut &'a str) -> Result<MagnetLink<'a>, ParseErrorKind> {
        let input = *cursor;

        // Phase one: general URI syntax.
        let uri = UriRef::parse(input).map_err(ParseErrorKind::Syntax)?;

        // Scheme names are case-insensitive per RFC 3986.
        if !uri.scheme().eq_ignore_ascii_case(SCHEME) {
            return Err(ParseErrorKind::InvalidScheme {
                found: uri.scheme().to_string(),
            });
        }

        // Phase two: exact topics are the only mandatory field, and each
        // one must name a URN that parses on its own. All other fields
        // are optional.
        let mut is_topic = IsExactTopic;
        let mut found = false;
        for param in uri.query_params() {
            if !is_topic.test(&param) {
                continue;
            }
            found = true;
            let value = param.value_or_empty();
            if UriRef::parse(value.as_raw()).is_err() {
                return Err(ParseErrorKind::InvalidExactTopic {
                    value: value.as_raw().to_string(),
                });
            }
        }
        if !found {
            return Err(ParseErrorKind::MissingExactTopic);
        }

        *cursor = &input[input.len()..];
        Ok(MagnetLink::from_validated(uri))
    }
}
