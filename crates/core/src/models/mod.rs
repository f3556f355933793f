pub mod quote;
pub mod session;
pub mod stock;
