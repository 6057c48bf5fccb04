//! Version 1 of the configuration format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{ApiUrl, Secret};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";
pub const DEFAULT_URL_VARIABLE: &str = "NODEGRAPH_API_URL";
/// The route the dashboard proxy maps onto the graph API.
pub const DEFAULT_ROUTE_PATH: &str = "/nodegraphds";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

/// Initial configuration, just enough to reach the graph API and elaborate a full
/// 'Configuration'.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    // Which version of the configuration format are we using
    pub version: Version,
    /// Base URL of the graph API, or of the proxy in front of it.
    pub url: ApiUrl,
    /// Route prefix placed between the base URL and every endpoint.
    #[serde(default = "default_route_path")]
    pub route_path: String,
    /// Give up on a single backend call after this many seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

fn default_route_path() -> String {
    DEFAULT_ROUTE_PATH.to_string()
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }

    pub fn empty() -> Self {
        Self {
            version: Version::This,
            url: ApiUrl(Secret::FromEnvironment {
                variable: DEFAULT_URL_VARIABLE.into(),
            }),
            route_path: default_route_path(),
            request_timeout_seconds: None,
        }
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path> + Send,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let to_parse_error = |error: serde_json::Error| ParseConfigurationError::ParseError {
        file_path: configuration_file.clone(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    };

    // check the version tag before anything else, so that a configuration written for another
    // version gets a sensible error instead of a list of missing fields
    let raw: serde_json::Value =
        serde_json::from_str(&configuration_file_contents).map_err(to_parse_error)?;
    match raw.get("version") {
        None => Err(ParseConfigurationError::DidNotFindExpectedVersionTag(
            configuration_file.clone(),
        ))?,
        Some(serde_json::Value::String(version)) if version == "1" => {}
        Some(other) => Err(ParseConfigurationError::UnsupportedVersion {
            file_path: configuration_file.clone(),
            version: other.to_string(),
        })?,
    }

    let parsed_config: ParsedConfiguration =
        serde_json::from_str(&configuration_file_contents).map_err(to_parse_error)?;

    if let ApiUrl(Secret::Plain(url)) = &parsed_config.url {
        if url.is_empty() {
            Err(ParseConfigurationError::EmptyUrl {
                file_path: configuration_file.clone(),
            })?;
        }
    }

    tracing::debug!(file = %configuration_file.display(), "parsed configuration");

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, together with the JSON schema
/// describing it.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).await?;

    let configuration_file = out_dir.join(CONFIGURATION_FILENAME);
    let mut contents = serde_json::to_string_pretty(&parsed_config)?;
    contents.push('\n');
    fs::write(&configuration_file, contents).await?;

    let schema_file = out_dir.join(CONFIGURATION_JSONSCHEMA_FILENAME);
    let mut schema = serde_json::to_string_pretty(&schemars::schema_for!(ParsedConfiguration))?;
    schema.push('\n');
    fs::write(&schema_file, schema).await?;

    Ok(())
}
