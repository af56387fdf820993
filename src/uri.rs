//! Generic URI reference view.

use std::fmt;

use crate::error::SyntaxError;
use crate::params::Params;
use crate::pct::find_malformed_pct;

/// A zero-copy view of a generically-parsed URI.
///
/// All components are slices of the original input; the view owns no
/// storage and is `Copy`. Components are kept percent-encoded; decoding
/// happens lazily at the query-parameter layer.
///
/// The `Default` value is the empty reference (every component empty or
/// absent). It is used as the sentinel result of transforms that cannot
/// fail for grammar-validated input.
///
/// # Examples
///
/// ```
/// use magnet_uri::UriRef;
///
/// let uri = UriRef::parse("udp://tracker.example.com:80").unwrap();
/// assert_eq!(uri.scheme(), "udp");
/// assert_eq!(uri.authority(), Some("tracker.example.com:80"));
///
/// let urn = UriRef::parse("urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a").unwrap();
/// assert_eq!(urn.path(), "btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UriRef<'a> {
    raw: &'a str,
    scheme: &'a str,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> UriRef<'a> {
    /// Parses a URI reference from a string.
    ///
    /// The whole input must match the generic URI grammar; trailing
    /// garbage is a syntax error.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if:
    /// - The input is empty
    /// - The scheme is missing or contains invalid characters
    /// - Any component contains a character outside its allowed set
    /// - A `%` is not followed by two hex digits
    pub fn parse(input: &'a str) -> Result<Self, SyntaxError> {
        if input.is_empty() {
            return Err(SyntaxError::Empty);
        }

        let (scheme, rest) = Self::split_scheme(input)?;
        let base = scheme.len() + 1;

        let (rest, fragment) = Self::split_fragment(rest);
        if let Some(frag) = fragment {
            let offset = base + rest.len() + 1;
            Self::check_component(frag, offset, "fragment", is_query_char)?;
        }

        let (rest, query) = Self::split_query(rest);
        if let Some(q) = query {
            let offset = base + rest.len() + 1;
            Self::check_component(q, offset, "query", is_query_char)?;
        }

        let (authority, path) = Self::split_authority(rest);
        let mut offset = base;
        if let Some(auth) = authority {
            offset += 2;
            Self::check_component(auth, offset, "authority", is_authority_char)?;
            offset += auth.len();
        }
        Self::check_component(path, offset, "path", is_path_char)?;

        Ok(Self {
            raw: input,
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    /// Returns the scheme, without the trailing ':'.
    #[must_use]
    pub const fn scheme(&self) -> &'a str {
        self.scheme
    }

    /// Returns the authority, without the leading "//", if present.
    #[must_use]
    pub const fn authority(&self) -> Option<&'a str> {
        self.authority
    }

    /// Returns the path, still percent-encoded.
    #[must_use]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// Returns the query, without the leading '?', if present.
    #[must_use]
    pub const fn query(&self) -> Option<&'a str> {
        self.query
    }

    /// Returns the fragment, without the leading '#', if present.
    #[must_use]
    pub const fn fragment(&self) -> Option<&'a str> {
        self.fragment
    }

    /// Returns the original text this view was parsed from.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Returns a lazy enumerator over the query parameters.
    ///
    /// An absent query yields an empty sequence.
    #[must_use]
    pub fn query_params(&self) -> Params<'a> {
        Params::new(self.query.unwrap_or(""))
    }

    fn split_scheme(input: &str) -> Result<(&str, &str), SyntaxError> {
        let mut iter = input.char_indices();
        if let Some((_, c)) = iter.next() {
            if !c.is_ascii_alphabetic() {
                return Err(SyntaxError::InvalidSchemeChar { char: c, position: 0 });
            }
        }
        for (i, c) in iter {
            match c {
                ':' => return Ok((&input[..i], &input[i + 1..])),
                c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
                c => return Err(SyntaxError::InvalidSchemeChar { char: c, position: i }),
            }
        }
        Err(SyntaxError::MissingScheme)
    }

    fn split_fragment(input: &str) -> (&str, Option<&str>) {
        match input.split_once('#') {
            Some((rest, frag)) => (rest, Some(frag)),
            None => (input, None),
        }
    }

    fn split_query(input: &str) -> (&str, Option<&str>) {
        match input.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (input, None),
        }
    }

    fn split_authority(input: &str) -> (Option<&str>, &str) {
        match input.strip_prefix("//") {
            Some(rest) => {
                let end = rest.find('/').unwrap_or(rest.len());
                (Some(&rest[..end]), &rest[end..])
            }
            None => (None, input),
        }
    }

    fn check_component(
        s: &str,
        offset: usize,
        component: &'static str,
        allowed: fn(char) -> bool,
    ) -> Result<(), SyntaxError> {
        if let Some(position) = find_malformed_pct(s) {
            return Err(SyntaxError::InvalidPercentEncoding {
                position: offset + position,
            });
        }
        for (i, c) in s.char_indices() {
            if c != '%' && !allowed(c) {
                return Err(SyntaxError::InvalidChar {
                    component,
                    char: c,
                    position: offset + i,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for UriRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<'a> TryFrom<&'a str> for UriRef<'a> {
    type Error = SyntaxError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn is_sub_delim(c: char) -> bool {
    matches!(c, '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=')
}

fn is_pchar(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@')
}

fn is_authority_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@' | '[' | ']')
}

fn is_path_char(c: char) -> bool {
    is_pchar(c) || c == '/'
}

fn is_query_char(c: char) -> bool {
    is_pchar(c) || matches!(c, '/' | '?')
}
