//! Service client implementations

mod cloudinary;
mod supabase;

pub use cloudinary::CloudinaryStorage;
pub use supabase::SupabaseClient;
