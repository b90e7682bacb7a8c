#![doc = include_str!("../README.md")]

pub mod broadcast;
pub mod config;
pub mod curves;
pub mod error;
pub mod pattern;

pub use broadcast::{setup, Header, MasterKey, Message, PublicParameters, SecretKey};
pub use config::SetupConfig;
pub use error::{BackendError, Error, InputError, Result};
pub use pattern::{Bit, Coverage, Identity, Pattern, SubsetDescriptor, Symbol};
