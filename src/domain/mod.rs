//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no CLI, no terminal I/O).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod navigator;

pub use arena::{ChildSlot, NodeData, RiverTree, TributaryNode};
pub use builder::{SkippedRecord, TreeBuilder};
pub use entities::{Dam, TributaryRecord};
pub use error::{DomainError, TreeResult};
pub use navigator::Navigator;
