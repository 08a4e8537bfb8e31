//! Adapters implementing the port traits.

pub mod live;
#[cfg(test)]
pub(crate) mod memory;
pub mod recording;
pub mod replaying;
