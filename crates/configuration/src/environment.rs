//! Access to the environment the connector runs in.
//!
//! Secrets in the configuration may refer to environment variables. They are resolved through
//! the [`Environment`] trait so that tests can supply a fixed set of variables.

use std::collections::HashMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The name of an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Variable(name) = self;
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("the environment variable {0} is not set")]
    VariableNotPresent(Variable),
    #[error("the environment variable {0} does not contain valid unicode")]
    NonUnicodeValue(Variable),
}

/// Reads environment variables.
pub trait Environment {
    fn read(&self, variable: &Variable) -> Result<String, Error>;
}

impl<E: Environment> Environment for &E {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        (*self).read(variable)
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        std::env::var(variable.as_str()).map_err(|error| match error {
            std::env::VarError::NotPresent => Error::VariableNotPresent(variable.clone()),
            std::env::VarError::NotUnicode(_) => Error::NonUnicodeValue(variable.clone()),
        })
    }
}

/// An environment without any variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        Err(Error::VariableNotPresent(variable.clone()))
    }
}

impl Environment for HashMap<Variable, String> {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.get(variable)
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_environment_reads_known_variables() {
        let environment = HashMap::from([(Variable::from("API_URL"), "http://api".to_string())]);

        assert_eq!(
            environment.read(&"API_URL".into()),
            Ok("http://api".to_string())
        );
        assert_eq!(
            environment.read(&"OTHER".into()),
            Err(Error::VariableNotPresent("OTHER".into()))
        );
    }

    #[test]
    fn empty_environment_has_nothing() {
        assert_eq!(
            EmptyEnvironment.read(&"PATH".into()),
            Err(Error::VariableNotPresent("PATH".into()))
        );
    }
}
