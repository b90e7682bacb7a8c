//! Setup configuration.

use crate::error::{InputError, Result};

/// Parameters fixed once at setup and shared by every later call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupConfig {
    identity_len: usize,
}

impl SetupConfig {
    /// Configure a system for identities of `identity_len` bits (`L`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use bestie::SetupConfig;
    ///
    /// assert_eq!(SetupConfig::new(8).unwrap().identity_len(), 8);
    /// assert!(SetupConfig::new(0).is_err());
    /// ```
    pub fn new(identity_len: usize) -> Result<Self> {
        if identity_len == 0 {
            return Err(InputError::ZeroLength.into());
        }
        Ok(SetupConfig { identity_len })
    }

    pub fn identity_len(&self) -> usize {
        self.identity_len
    }
}
