//! Vector-search client for a Supabase project.
//!
//! Similarity search lives in Postgres functions (pgvector); this crate only
//! calls them over PostgREST and decodes the ranked rows. Ranking is owned by
//! the database: rows come back in the order the function returns them.

pub mod config;
pub mod errors;
pub mod record;
pub mod supabase_client;

pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use record::ContextRow;
pub use supabase_client::SupabaseStore;
