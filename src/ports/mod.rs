//! Port traits defining external boundaries.
//!
//! The roller reaches the outside world only through these traits: the
//! wall clock that names the snapshot and the filesystem it scans and
//! writes. Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;

pub use clock::Clock;
pub use filesystem::{DirEntry, FileSystem};
