pub mod app;
pub mod error;
pub mod flash;
pub mod http_routes;
pub mod pages;
pub mod state;
