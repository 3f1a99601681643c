pub mod health;
pub mod metrics;
pub mod root;
pub mod sleep;
