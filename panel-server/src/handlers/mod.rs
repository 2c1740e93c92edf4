// Main handlers (system/health handlers)
pub mod main_handlers;
pub use main_handlers::AppState;

// Login and logout
pub mod auth_handlers;

// Schema browsing and table data handlers
pub mod db_handlers;

// Free-form SQL execution and SQL generation
pub mod query_handlers;

// Blob download and upload (kept apart because of the multipart handling)
pub mod blob_handlers;
