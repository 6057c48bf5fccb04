mod api_url;
mod secret;

pub use api_url::ApiUrl;
pub use secret::Secret;
