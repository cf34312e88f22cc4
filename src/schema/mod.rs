pub mod registry;
pub mod survey;
pub mod types;
pub mod write;

pub use registry::{Registry, RegistryError};
pub use types::{ColumnDefinition, ColumnTag, SemanticType, StorageType};
pub use write::write_dictionary;
