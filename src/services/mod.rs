// Service exports
pub mod appwrite;
pub mod audit;
pub mod cache;
pub mod catalog;
pub mod postgres;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use audit::AuditLogger;
pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use catalog::CatalogService;
pub use postgres::{PostgresClient, PostgresError};
