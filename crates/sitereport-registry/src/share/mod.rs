//! Report-share registry: token-scoped, time-boxed grants.

pub mod memory;
pub mod registry;
pub mod token;

pub use memory::MemoryShareRegistry;
pub use registry::ShareRegistry;
pub use token::ShareTokenGenerator;
