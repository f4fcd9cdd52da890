pub mod api_client;
pub mod errors;
pub mod services;
pub mod testing;
