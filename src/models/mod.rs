pub mod auction;
pub mod health;
pub mod operator;
pub mod pool;
pub mod status;
