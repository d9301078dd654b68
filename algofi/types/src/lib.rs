mod address;
mod client;
mod decoder;
mod error;
mod field;
mod manager;
mod state;
mod testing;

pub use {address::*, client::*, decoder::*, error::*, field::*, manager::*, state::*, testing::*};
