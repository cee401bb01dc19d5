//! Payload persistence

mod local_scratch_space;

pub use local_scratch_space::LocalScratchSpace;
