pub mod connection;
pub mod profile;
