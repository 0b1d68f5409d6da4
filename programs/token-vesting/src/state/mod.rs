pub mod config;
pub mod grant_book;

pub use config::*;
pub use grant_book::*;
