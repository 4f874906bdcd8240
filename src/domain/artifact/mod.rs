pub mod error;
pub mod model;
pub mod sweeper;

pub use error::ArtifactError;
pub use model::{Artifact, StoredAudio};
pub use sweeper::ExpirySweeper;
