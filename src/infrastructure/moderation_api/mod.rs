pub mod dto;
pub mod http_client;
pub mod traits;
