pub mod seed;
pub mod user_store;
