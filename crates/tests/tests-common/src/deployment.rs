//! Deployment functions used across test cases.

use std::path::PathBuf;

/// The directory holding the static test configuration.
pub const STATIC_CONFIGURATION_PATH: &str = "static/";

/// Find the project root via the crate root provided by `cargo test`,
/// and get our single static configuration directory.
/// This depends on the convention that all our crates live in `/crates/<group>/<name>`.
pub fn get_deployment_dir(deployment_path: &str) -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("../../../");
    d.push(deployment_path);
    d
}
