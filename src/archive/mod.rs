pub mod error;
pub mod fetcher;
pub mod request;
pub mod response;
pub mod retry;
pub mod settings;
pub mod transport;
