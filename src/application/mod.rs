// Application layer - request execution and response shaping
pub mod datasource_client;
pub mod executor;
pub mod normalizer;
pub mod transport;
