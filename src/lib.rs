pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;


pub use db::Ledger;
pub use handlers::{AppState, router};
