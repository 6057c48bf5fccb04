//! Build a data source router against a running mock graph API.

use std::collections::HashMap;

use ndc_nodegraph::connector::{NodeGraph, NodeGraphSetup};
use ndc_nodegraph::server::{self, ServerState};
use nodegraph_configuration::environment::Variable;
use nodegraph_configuration::version1::DEFAULT_URL_VARIABLE;

use crate::deployment::{get_deployment_dir, STATIC_CONFIGURATION_PATH};

/// Initialise server state from the static configuration, pointing it at `api_url`.
pub async fn create_server_state(api_url: &str) -> ServerState<NodeGraph> {
    let _ = env_logger::builder().is_test(true).try_init();

    let environment: HashMap<Variable, String> =
        HashMap::from([(DEFAULT_URL_VARIABLE.into(), api_url.to_string())]);
    let setup = NodeGraphSetup::new(environment);

    server::init_server_state(setup, get_deployment_dir(STATIC_CONFIGURATION_PATH))
        .await
        .expect("unable to initialise server state")
}

/// Creates a router with a fresh state, pointing it at `api_url`.
pub async fn create_router(api_url: &str) -> axum::Router {
    server::create_router(create_server_state(api_url).await)
}
