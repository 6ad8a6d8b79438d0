// Domain layer - plain values shared by every operation
pub mod connection;
pub mod error;
pub mod requests;
pub mod response;
pub mod results;
pub mod settings;
