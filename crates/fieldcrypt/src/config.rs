//! Configuration loading and validation for fieldcrypt consumers.
//!
//! Values are read from `FIELDCRYPT_*` environment variables. Key material is
//! never part of this configuration; it is supplied by the key-provisioning
//! collaborator directly to [`crate::FieldProtector`].

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::masking::MaskPolicy;

/// Validated fieldcrypt configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldCryptoConfig {
    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Leading characters kept visible by the default display mask.
    #[serde(default = "default_mask_prefix_keep")]
    pub mask_prefix_keep: usize,

    /// Trailing characters kept visible by the default display mask.
    #[serde(default = "default_mask_suffix_keep")]
    pub mask_suffix_keep: usize,

    /// Replacement character of the default display mask. Exactly one character.
    #[serde(default = "default_mask_char")]
    pub mask_char: String,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_mask_prefix_keep() -> usize {
    0
}
fn default_mask_suffix_keep() -> usize {
    4
}
fn default_mask_char() -> String {
    "*".into()
}

impl Default for FieldCryptoConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            mask_prefix_keep: default_mask_prefix_keep(),
            mask_suffix_keep: default_mask_suffix_keep(),
            mask_char: default_mask_char(),
        }
    }
}

impl FieldCryptoConfig {
    /// Load and validate configuration from `FIELDCRYPT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("FIELDCRYPT").try_parsing(true))
            .build()
            .context("failed to build fieldcrypt configuration from environment")?;

        let c: FieldCryptoConfig = cfg
            .try_deserialize()
            .context("failed to deserialise fieldcrypt configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The display mask described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `mask_char` is not exactly one character.
    pub fn mask_policy(&self) -> Result<MaskPolicy> {
        let mask_char = single_char(&self.mask_char)?;
        Ok(MaskPolicy::new(
            self.mask_prefix_keep,
            self.mask_suffix_keep,
            mask_char,
        ))
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("FIELDCRYPT_LOG_LEVEL must not be empty");
        }
        single_char(&self.mask_char)?;
        Ok(())
    }
}

fn single_char(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("FIELDCRYPT_MASK_CHAR must be exactly one character, got {s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_mask_prefix_keep(), 0);
        assert_eq!(default_mask_suffix_keep(), 4);
        assert_eq!(default_mask_char(), "*");
        assert_eq!(
            FieldCryptoConfig::default().mask_policy().unwrap(),
            MaskPolicy::default()
        );
    }

    #[test]
    fn validate_accepts_multibyte_mask_char() {
        let cfg = FieldCryptoConfig {
            mask_char: "•".into(),
            ..FieldCryptoConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.mask_policy().unwrap().mask_char, '•');
    }

    #[test]
    fn validate_rejects_empty_mask_char() {
        let cfg = FieldCryptoConfig {
            mask_char: "".into(),
            ..FieldCryptoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_multi_char_mask() {
        let cfg = FieldCryptoConfig {
            mask_char: "**".into(),
            ..FieldCryptoConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(cfg.mask_policy().is_err());
    }

    #[test]
    fn validate_rejects_blank_log_level() {
        let cfg = FieldCryptoConfig {
            log_level: "  ".into(),
            ..FieldCryptoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn deserializes_partial_source_with_defaults() {
        let cfg: FieldCryptoConfig = config::Config::builder()
            .set_override("mask_prefix_keep", 2)
            .unwrap()
            .set_override("mask_char", "#")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.mask_policy().unwrap(), MaskPolicy::new(2, 4, '#'));
        assert_eq!(cfg.log_level, "info");
    }
}
