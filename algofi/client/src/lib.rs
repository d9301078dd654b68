mod error;
mod http;
mod manager;
mod types;

pub use {error::*, http::*, manager::*, types::*};
