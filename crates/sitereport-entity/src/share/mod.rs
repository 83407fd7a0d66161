//! Report-share models.

pub mod model;

pub use model::ShareSettings;
