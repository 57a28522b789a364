pub mod auth;
pub mod batch;
pub mod cleaner;
pub mod config;
pub mod delay;
pub mod extractor;
pub mod logger;
pub mod model;
pub mod paginator;
pub mod selectors;
pub mod session;
pub mod snapshot;
pub mod warehouse;

// Exporting types for convenience
pub use cleaner::Cleaner;
pub use config::AppConfig;
pub use model::JobRecord;
pub use selectors::SelectorSet;
pub use session::Session;
