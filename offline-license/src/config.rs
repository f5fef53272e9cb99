//! Verifier configuration, read from `verifier.toml`.
//!
//! ```toml
//! public_key_path = "license-public.key"
//! algorithm = "rsa-sha1"
//! ```
//!
//! Both fields are optional. A relative key path is resolved against the
//! directory holding the configuration file.

use crate::clock::{Clock, SystemClock};
use crate::error::{LicenseError, LicenseResult};
use crate::keys::{read_verifier, SignatureAlgorithm};
use crate::verifier::LicenseVerifier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Default public key file name.
pub const DEFAULT_PUBLIC_KEY_FILE: &str = "license-public.key";

/// Configuration file name under the application config directory.
pub const CONFIG_FILE_NAME: &str = "verifier.toml";

const APP_DIR: &str = "offline-license";

/// How to build a [`LicenseVerifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfig {
    /// DER X.509 public key file.
    #[serde(default = "default_public_key_path")]
    pub public_key_path: PathBuf,
    /// Signature algorithm of the key.
    #[serde(default)]
    pub algorithm: SignatureAlgorithm,
}

fn default_public_key_path() -> PathBuf {
    PathBuf::from(DEFAULT_PUBLIC_KEY_FILE)
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            public_key_path: default_public_key_path(),
            algorithm: SignatureAlgorithm::default(),
        }
    }
}

impl VerifierConfig {
    /// Parses TOML configuration. Relative paths are left as written.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the TOML is invalid.
    pub fn from_toml_str(contents: &str) -> LicenseResult<Self> {
        toml::from_str(contents)
            .map_err(|e| LicenseError::Configuration(format!("invalid verifier config: {e}")))
    }

    /// Reads a configuration file, resolving a relative key path against
    /// the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the file cannot be read
    /// or parsed.
    pub fn from_path(path: &Path) -> LicenseResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LicenseError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        if config.public_key_path.is_relative()
            && let Some(dir) = path.parent()
        {
            config.public_key_path = dir.join(&config.public_key_path);
        }

        info!("Loaded verifier config from {:?}", path);
        Ok(config)
    }

    /// Returns `<config dir>/offline-license/verifier.toml`, if the platform
    /// has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration from [`Self::default_path`], falling back to
    /// defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the file exists but cannot
    /// be read or parsed.
    pub fn load() -> LicenseResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                info!("No verifier config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads the public key and builds a verifier on the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the key cannot be loaded.
    pub fn build_verifier(&self) -> LicenseResult<LicenseVerifier> {
        self.build_verifier_with_clock(Arc::new(SystemClock))
    }

    /// Reads the public key and builds a verifier on `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Configuration`] if the key cannot be loaded.
    pub fn build_verifier_with_clock(&self, clock: Arc<dyn Clock>) -> LicenseResult<LicenseVerifier> {
        let public_key = read_verifier(self.algorithm, &self.public_key_path)?;
        Ok(LicenseVerifier::from_boxed(public_key, clock))
    }
}
