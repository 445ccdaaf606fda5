pub mod column;
pub mod fetcher;
pub mod kind;
pub mod loader;
#[cfg(feature = "reqwest")]
pub mod reqwest_fetcher;
pub mod table;
