//! Configuration for the connector.

use std::time::Duration;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// 'ParsedConfiguration' deals with the serialized format, including secrets that still have to
/// be read from the environment. Values of this type are produced from a 'ParsedConfiguration'
/// using 'make_runtime_configuration', at which point every secret has been resolved and the
/// backend URL has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Base URL without a trailing slash.
    pub url: String,
    /// Prefix placed between the base URL and every endpoint, e.g. `/nodegraphds`.
    pub route_path: String,
    /// Optional client-side timeout for a single backend call.
    pub request_timeout: Option<Duration>,
}

impl Configuration {
    /// The URL every endpoint path is appended to.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.url, self.route_path)
    }
}
