//! Assemble the nodes and edges frames of one query target.

use query_engine_metadata::metadata::{
    DataFrame, GraphData, GraphFields, EDGES_FRAME_NAME, NODES_FRAME_NAME,
};

use super::fields::map_fields;

/// The two frames the node graph panel needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrames {
    pub nodes: DataFrame,
    pub edges: DataFrame,
}

impl From<GraphFrames> for Vec<DataFrame> {
    fn from(frames: GraphFrames) -> Self {
        vec![frames.nodes, frames.edges]
    }
}

/// Build the frames from the responses of the fields and data endpoints.
pub fn graph_frames(ref_id: &str, fields: GraphFields, data: GraphData) -> GraphFrames {
    let GraphFields {
        nodes_fields,
        edges_fields,
    } = fields;

    let mut nodes = DataFrame::node_graph(NODES_FRAME_NAME, ref_id, map_fields(nodes_fields));
    let mut edges = DataFrame::node_graph(EDGES_FRAME_NAME, ref_id, map_fields(edges_fields));

    for node in data.nodes {
        nodes.add(node);
    }
    for edge in data.edges {
        edges.add(edge);
    }

    tracing::debug!(
        ref_id,
        nodes = nodes.len(),
        edges = edges.len(),
        empty_node_cells = empty_cells(&nodes),
        empty_edge_cells = empty_cells(&edges),
        "assembled graph frames"
    );

    GraphFrames { nodes, edges }
}

/// The number of cells of declared fields that rows leave out or set to `null`.
fn empty_cells(frame: &DataFrame) -> usize {
    frame
        .fields
        .iter()
        .map(|field| frame.values(&field.name).filter(|value| value.is_null()).count())
        .sum()
}
