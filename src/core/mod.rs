pub mod extractor;
pub mod search;

pub use crate::domain::model::{InventoryEntry, Product, SearchRequest, SearchResponse};
pub use crate::domain::ports::{ConfigProvider, ProductSource};
pub use crate::utils::error::Result;
