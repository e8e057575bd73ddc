//! Display masking. Presentation only: masked values are never persisted and
//! have no relationship to ciphertext or tokens.

pub mod policy;

pub use policy::MaskPolicy;

/// Redact `value` for display according to `policy`.
pub fn mask(value: &str, policy: &MaskPolicy) -> String {
    policy.apply(value)
}

/// [`mask`] over a possibly-absent value; absence is preserved.
pub fn mask_optional(value: Option<&str>, policy: &MaskPolicy) -> Option<String> {
    value.map(|v| policy.apply(v))
}
