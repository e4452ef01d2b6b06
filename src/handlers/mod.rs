pub mod auctions;
pub mod health;
pub mod operators;
pub mod pools;
pub mod status;
