//! External service clients for the Roost search pipeline.

pub mod inference_client;

pub use inference_client::InferenceClient;
