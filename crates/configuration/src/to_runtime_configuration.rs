//! Convert the parsed configuration into the runtime configuration.

use std::time::Duration;

use url::Url;

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ApiUrl, Secret};
use crate::version1::{ParsedConfiguration, CONFIGURATION_FILENAME};

/// Resolve every secret and validate the backend URL.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let url = match parsed_config.url {
        ApiUrl(Secret::Plain(url)) => Ok(url),
        ApiUrl(Secret::FromEnvironment { variable }) => {
            environment.read(&variable).map_err(|error| {
                MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                    file_path: CONFIGURATION_FILENAME.into(),
                    message: error.to_string(),
                }
            })
        }
    }?;

    let url = url.trim_end_matches('/').to_string();
    let parsed_url = Url::parse(&url).map_err(|error| MakeRuntimeConfigurationError::InvalidUrl {
        url: url.clone(),
        message: error.to_string(),
    })?;
    if !matches!(parsed_url.scheme(), "http" | "https") {
        Err(MakeRuntimeConfigurationError::InvalidUrl {
            url: url.clone(),
            message: format!("unsupported scheme \"{}\"", parsed_url.scheme()),
        })?;
    }

    Ok(Configuration {
        url,
        route_path: parsed_config.route_path,
        request_timeout: parsed_config
            .request_timeout_seconds
            .map(Duration::from_secs),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::environment::{EmptyEnvironment, Variable};
    use crate::version1::DEFAULT_URL_VARIABLE;

    fn plain(url: &str) -> ParsedConfiguration {
        ParsedConfiguration {
            url: url.into(),
            ..ParsedConfiguration::empty()
        }
    }

    #[test]
    fn trims_trailing_slashes() {
        let configuration =
            make_runtime_configuration(plain("http://localhost:5000/"), EmptyEnvironment).unwrap();

        assert_eq!(configuration.url, "http://localhost:5000");
        assert_eq!(configuration.base_url(), "http://localhost:5000/nodegraphds");
        assert_eq!(configuration.request_timeout, None);
    }

    #[test]
    fn reads_url_from_environment() {
        let environment = HashMap::from([(
            Variable::from(DEFAULT_URL_VARIABLE),
            "https://graph.example.com".to_string(),
        )]);

        let configuration =
            make_runtime_configuration(ParsedConfiguration::initial(), &environment).unwrap();

        assert_eq!(configuration.url, "https://graph.example.com");
    }

    #[test]
    fn missing_variable_is_reported() {
        let error = make_runtime_configuration(ParsedConfiguration::initial(), EmptyEnvironment)
            .unwrap_err();

        assert!(matches!(
            error,
            MakeRuntimeConfigurationError::MissingEnvironmentVariable { .. }
        ));
        assert!(error.to_string().contains(DEFAULT_URL_VARIABLE));
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            make_runtime_configuration(plain("ftp://files.example.com"), EmptyEnvironment),
            Err(MakeRuntimeConfigurationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            make_runtime_configuration(plain("not a url"), EmptyEnvironment),
            Err(MakeRuntimeConfigurationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn converts_timeout() {
        let parsed = ParsedConfiguration {
            request_timeout_seconds: Some(30),
            ..plain("http://localhost")
        };

        let configuration = make_runtime_configuration(parsed, EmptyEnvironment).unwrap();

        assert_eq!(configuration.request_timeout, Some(Duration::from_secs(30)));
    }
}
