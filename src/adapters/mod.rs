pub mod api_client;
pub mod encoder;
pub mod viacep;
