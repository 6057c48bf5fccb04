//! This defines a `DataSource` implementation for the node graph API.
//!
//! A data source answers two calls from the dashboard: run a query, and test the connection.
//! How it is set up (configuration, state) is described by `DataSourceSetup`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info_span, Instrument};

use nodegraph_configuration as configuration;
use nodegraph_configuration::environment::Environment;

use super::error::{QueryError, SetupError};
use super::health;
use super::models::{QueryRequest, QueryResponse, TestDataSourceResponse};
use super::query;
use super::state;

/// The calls a dashboard makes to a data source.
#[async_trait]
pub trait DataSource {
    /// The validated configuration.
    type Configuration: Send + Sync + 'static;
    /// The unserializable, transient state.
    type State: Send + Sync + 'static;

    /// Run the targets of a request and return their frames.
    async fn query(
        configuration: &Self::Configuration,
        state: &Self::State,
        request: QueryRequest,
    ) -> Result<QueryResponse, QueryError>;

    /// Check whether the backend can be reached. Failures are part of the response.
    async fn test_datasource(
        configuration: &Self::Configuration,
        state: &Self::State,
    ) -> TestDataSourceResponse;
}

/// Turns a configuration directory into a running data source.
#[async_trait]
pub trait DataSourceSetup {
    type DataSource: DataSource;

    /// Validate the raw configuration provided by the user,
    /// returning a configuration error or a validated `DataSource::Configuration`.
    async fn parse_configuration(
        &self,
        configuration_dir: impl AsRef<Path> + Send,
    ) -> Result<<Self::DataSource as DataSource>::Configuration, SetupError>;

    /// Initialize the data source's in-memory state, registering its metrics.
    async fn try_init_state(
        &self,
        configuration: &<Self::DataSource as DataSource>::Configuration,
        metrics: &mut prometheus::Registry,
    ) -> Result<<Self::DataSource as DataSource>::State, SetupError>;
}

pub struct NodeGraph;

#[async_trait]
impl DataSource for NodeGraph {
    type Configuration = Arc<configuration::Configuration>;
    type State = Arc<state::State>;

    /// Execute a query.
    ///
    /// Only the frames of the first target are returned, although every target is run.
    async fn query(
        configuration: &Self::Configuration,
        state: &Self::State,
        request: QueryRequest,
    ) -> Result<QueryResponse, QueryError> {
        query::query(state, request)
            .instrument(info_span!(
                "Query",
                base_url = %configuration.base_url()
            ))
            .await
            .map_err(|err| {
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "nodegraph",
                    event.name = "Query error",
                    name = "Query error",
                    body = %err,
                    error = true,
                );
                err
            })
    }

    /// Test the connection to the graph API.
    async fn test_datasource(
        configuration: &Self::Configuration,
        state: &Self::State,
    ) -> TestDataSourceResponse {
        let response = health::health_check(state)
            .instrument(info_span!(
                "Test data source",
                base_url = %configuration.base_url()
            ))
            .await;

        if !response.is_success() {
            tracing::error!(
                meta.signal_type = "log",
                event.domain = "nodegraph",
                event.name = "Health check error",
                name = "Health check error",
                body = %response.message,
                error = true,
            );
        }
        response
    }
}

pub struct NodeGraphSetup<Env: Environment> {
    environment: Env,
}

impl<Env: Environment> NodeGraphSetup<Env> {
    pub fn new(environment: Env) -> Self {
        Self { environment }
    }
}

#[async_trait]
impl<Env: Environment + Send + Sync> DataSourceSetup for NodeGraphSetup<Env> {
    type DataSource = NodeGraph;

    async fn parse_configuration(
        &self,
        configuration_dir: impl AsRef<Path> + Send,
    ) -> Result<<Self::DataSource as DataSource>::Configuration, SetupError> {
        // Note that we don't log validation errors, because they are part of the normal business
        // operation of configuration validation, i.e. they don't represent an error condition that
        // signifies that anything has gone wrong with the process or infrastructure.
        let parsed_configuration = configuration::parse_configuration(configuration_dir)
            .instrument(info_span!("parse configuration"))
            .await?;

        let runtime_configuration =
            configuration::make_runtime_configuration(parsed_configuration, &self.environment)?;

        Ok(Arc::new(runtime_configuration))
    }

    async fn try_init_state(
        &self,
        configuration: &<Self::DataSource as DataSource>::Configuration,
        metrics: &mut prometheus::Registry,
    ) -> Result<<Self::DataSource as DataSource>::State, SetupError> {
        state::create_state(configuration, metrics)
            .instrument(info_span!("Initialise state"))
            .await
            .map(Arc::new)
            .map_err(|err| {
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "nodegraph",
                    event.name = "Initialization error",
                    name = "Initialization error",
                    body = %err,
                    error = true,
                );
                SetupError::from(err)
            })
    }
}
