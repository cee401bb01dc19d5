//! Repository traits (interfaces)
//!
//! Contracts for the collaborators the domain depends on but does not own:
//! the metadata inspection tool and payload scratch storage.

mod metadata_source;
mod scratch_space;

pub use metadata_source::{MetadataSource, NoMetadata, StaticMetadata};
pub use scratch_space::{ScratchError, ScratchSpace};
