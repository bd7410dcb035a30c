pub mod basic_auth;
pub mod rest_client;
