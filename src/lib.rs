//! Parser and lazy view types for the `magnet:` URI scheme.
//!
//! This crate parses magnet links in two passes: the generic URI grammar
//! first, then a scheme-specific rule that enforces the magnet invariants
//! (at least one exact topic, every exact topic naming a valid URN). The
//! result is a [`MagnetLink`] view bound to the input's lifetime: no
//! component is copied out, and the field accessors are lazy sequences
//! computed on demand.
//!
//! # Quick Start
//!
//! ```rust
//! use magnet_uri::MagnetLink;
//!
//! let link = MagnetLink::parse(
//!     "magnet:?xt=urn:btih:d2474e86c95b19b8bcfdb92bc12c9d44667cfa36\
//!      &dn=Leaves+of+Grass+by+Walt+Whitman.epub\
//!      &tr=udp%3A%2F%2Ftracker.example.com%3A80",
//! )
//! .unwrap();
//!
//! // Exact topics, info hashes and protocols are lazy views.
//! assert_eq!(
//!     link.info_hashes().next(),
//!     Some("d2474e86c95b19b8bcfdb92bc12c9d44667cfa36"),
//! );
//! assert_eq!(link.protocols().next(), Some("btih"));
//!
//! // Doubly-encoded fields decode through a caller-supplied buffer.
//! let mut buf = String::new();
//! let tracker = link.address_trackers(&mut buf).next().unwrap();
//! assert!(tracker.decoded_eq("udp://tracker.example.com:80"));
//!
//! // Single-valued lookups decode lazily too.
//! assert!(link.display_name().unwrap().decoded_eq("Leaves of Grass by Walt Whitman.epub"));
//! ```
//!
//! # Fields
//!
//! | Key | Accessor | Meaning |
//! |-----|----------|---------|
//! | `xt`, `xt.N` | [`MagnetLink::exact_topics`] | URN of the file hash (mandatory) |
//! | `tr` | [`MagnetLink::address_trackers`] | Tracker URL |
//! | `xs` | [`MagnetLink::exact_sources`] | Direct download source |
//! | `as` | [`MagnetLink::acceptable_sources`] | Fallback download source |
//! | `mt` | [`MagnetLink::manifest_topics`] | Manifest of further links |
//! | `ws` | [`MagnetLink::web_seed`] | Payload served over HTTP(S) |
//! | `kt` | [`MagnetLink::keyword_topic`] | Search keywords |
//! | `dn` | [`MagnetLink::display_name`] | Display filename |
//! | `x.*` | [`MagnetLink::param`] | Informal extension parameters |
//!
//! # Errors
//!
//! Parsing never panics: a syntactically invalid URI, a non-`magnet`
//! scheme, a missing exact topic, and an exact topic that is not itself a
//! URI are all reported through [`ParseError`]. Optional fields whose
//! values fail to decode or re-parse are silently absent from their views
//! rather than being errors.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod constants;
mod error;
mod fields;
mod filter;
mod link;
mod params;
mod pct;
pub mod prelude;
mod rule;
mod uri;

pub use constants::{
    ACCEPTABLE_SOURCE, ADDRESS_TRACKER, DISPLAY_NAME, EXACT_SOURCE, EXACT_TOPIC,
    EXTENSION_PREFIX, KEYWORD_TOPIC, MANIFEST_TOPIC, SCHEME, WEB_SEED,
};
pub use error::{DecodeError, ParseError, ParseErrorKind, SyntaxError};
pub use fields::{IsExactTopic, IsUriWithKey, ToDecodedValue, ToInfohash, ToProtocol, ToUri};
pub use filter::{FilteredView, Predicate, PredicateFn, Transform, TransformFn};
pub use link::{InfoHashes, MagnetLink, Protocols, Topics, UriValues};
pub use params::{Param, Params};
pub use pct::{DecodedBytes, EncodedStr};
pub use rule::MagnetLinkRule;
pub use uri::UriRef;
