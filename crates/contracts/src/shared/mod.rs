pub mod events;
pub mod filter;
