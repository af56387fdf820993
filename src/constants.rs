//! Constants for magnet link parsing.

/// The URI scheme.
pub const SCHEME: &str = "magnet";

/// Query key for exact topics (also matched as `xt.1`, `xt.2`, ...).
pub const EXACT_TOPIC: &str = "xt";

/// Query key for address trackers.
pub const ADDRESS_TRACKER: &str = "tr";

/// Query key for exact sources.
pub const EXACT_SOURCE: &str = "xs";

/// Query key for acceptable sources.
pub const ACCEPTABLE_SOURCE: &str = "as";

/// Query key for manifest topics.
pub const MANIFEST_TOPIC: &str = "mt";

/// Query key for web seeds.
pub const WEB_SEED: &str = "ws";

/// Query key for the keyword topic.
pub const KEYWORD_TOPIC: &str = "kt";

/// Query key for the display name.
pub const DISPLAY_NAME: &str = "dn";

/// Prefix of extension parameter keys, e.g. `x.parameter_name`.
pub const EXTENSION_PREFIX: &str = "x.";
