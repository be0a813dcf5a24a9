//! External service clients.

pub mod supabase;

pub use supabase::{SupabaseClient, SupabaseError, WaitlistRecord};
