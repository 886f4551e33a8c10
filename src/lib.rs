pub mod compare;
pub mod config;
pub mod error;
pub mod galloping;
pub mod kway;
pub mod search;
pub mod sort;
pub mod visitor;

pub use {
    compare::{Compare, Natural, Reversed},
    config::RadixConfig,
    error::{Error, Result},
};
