pub mod endpoints;
pub mod http;
pub mod traits;
