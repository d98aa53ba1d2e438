//! Application layer for the Roost conversational search engine.
//!
//! This crate wires the domain components into the per-turn use case that
//! request handlers call.

pub mod audio;
pub mod turn_usecase;

pub use audio::AudioArtifact;
pub use turn_usecase::{SearchTurnUseCase, TurnResponse};
