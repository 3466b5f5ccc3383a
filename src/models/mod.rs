pub mod api;
pub mod domain;
pub mod enums;
pub mod tool_io;

pub use domain::{ActDetail, ActSummary, EnrichedResponse, Hint, LoadedDocument, StoredResultSet};
pub use enums::{ContentFormat, DetailLevel, MetadataCategory, Publisher, RelationshipType};
