use std::fs;
use std::path::PathBuf;

use query_engine_metadata::metadata::{DataFrame, GraphData, GraphFields};
use query_engine_translation::translation::frames::graph_frames;

/// Build the frames of a golden file directory, and read the frames we expect from it.
pub fn test_translation(testname: &str) -> (Vec<DataFrame>, Vec<DataFrame>) {
    let directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/goldenfiles")
        .join(testname);

    let fields: GraphFields = read_json(&directory, "fields.json");
    let data: GraphData = read_json(&directory, "data.json");
    let expected: Vec<DataFrame> = read_json(&directory, "expected.json");

    (graph_frames("A", fields, data).into(), expected)
}

fn read_json<T: serde::de::DeserializeOwned>(directory: &std::path::Path, file: &str) -> T {
    let path = directory.join(file);
    let contents = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("unable to read {}: {err}", path.display()));
    serde_json::from_str(&contents)
        .unwrap_or_else(|err| panic!("unable to parse {}: {err}", path.display()))
}
