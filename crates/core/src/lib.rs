pub mod config;
pub mod error;
pub mod index;
pub mod locate;
pub mod logging;
pub mod model;
pub mod parser;
pub mod view;

pub use error::Result;
