//! Implement the query flow: one task per target, graph frames out.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use query_engine_execution::query::{self as execution, GraphResponse};
use query_engine_translation::translation::frames::{graph_frames, GraphFrames};
use query_engine_translation::translation::template::{interpolate, ScopedVars};

use crate::error::QueryError;
use crate::models::{QueryRequest, QueryResponse, QueryTarget};
use crate::state::State;

/// Execute a query request.
///
/// Every target is executed, concurrently, but only the frames of the first target are
/// returned. Failures of the other targets are logged and dropped.
pub async fn query(state: &State, request: QueryRequest) -> Result<QueryResponse, QueryError> {
    let QueryRequest {
        targets,
        scoped_vars,
    } = request;
    let scoped_vars = Arc::new(scoped_vars);

    let tasks: Vec<_> = targets
        .into_iter()
        .map(|target| {
            let state = state.clone();
            let scoped_vars = Arc::clone(&scoped_vars);
            let span = info_span!("Execute target", ref_id = %target.ref_id);
            tokio::spawn(
                async move { execute_target(&state, target, &scoped_vars).await }.instrument(span),
            )
        })
        .collect();

    // wait for every target before looking at the results
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(match task.await {
            Ok(result) => result,
            Err(join_error) => Err(QueryError::TaskFailed(join_error.to_string())),
        });
    }

    let mut results = results.into_iter();
    let Some(first) = results.next() else {
        return Ok(QueryResponse { data: vec![] });
    };

    for (index, result) in results.enumerate() {
        if let Err(error) = result {
            tracing::warn!(
                target_index = index + 1,
                error = %error,
                "query target failed; its result would have been discarded anyway"
            );
        }
    }

    let frames = first?;
    state.metrics.record_successful_query();

    Ok(QueryResponse {
        data: frames.into(),
    })
}

/// Execute a single target: resolve its variables, fetch fields and data, build the frames.
pub async fn execute_target(
    state: &State,
    target: QueryTarget,
    scoped_vars: &ScopedVars,
) -> Result<GraphFrames, QueryError> {
    state.metrics.record_query_target();

    let resolved_query = interpolate(&target.query_text, scoped_vars);
    tracing::debug!(query = %resolved_query, "resolved query text");

    let GraphResponse { fields, data } =
        execution::fetch_graph(&state.backend, &state.metrics, &resolved_query)
            .instrument(info_span!("Fetch graph"))
            .await?;

    Ok(graph_frames(&target.ref_id, fields, data))
}
