#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod http;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod persistence;

pub use crate::core::*;

#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use persistence::{default_save_path, PersistError};
