// External service clients
mod save_client;

pub use save_client::{HttpSaveClient, SaveClientError, SaveEndpointTrait};

#[cfg(any(test, feature = "mock"))]
pub use save_client::tests;
