//! Page-lock registry: lease-based mutual exclusion per page.

pub mod memory;
pub mod registry;

pub use memory::MemoryLockRegistry;
pub use registry::{AcquireRequest, LockRegistry};
