//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types, making it easy
//! to get started with the crate:
//!
//! ```rust
//! use magnet_uri::prelude::*;
//!
//! let link = MagnetLink::parse("magnet:?xt=urn:btih:abc").unwrap();
//! assert_eq!(link.uri().scheme(), "magnet");
//! ```

pub use crate::{
    // Core types
    EncodedStr, MagnetLink, MagnetLinkRule, Param, Params, UriRef,
    // Views
    FilteredView, InfoHashes, Protocols, Topics, UriValues,
    // Errors
    DecodeError, ParseError, ParseErrorKind, SyntaxError,
    // Constants
    SCHEME,
};
