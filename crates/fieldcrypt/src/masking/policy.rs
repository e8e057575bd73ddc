//! [`MaskPolicy`]: positional redaction of display strings.

use serde::Deserialize;

/// How much of a value stays visible when it is masked for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MaskPolicy {
    /// Leading characters left unchanged.
    pub prefix_keep: usize,
    /// Trailing characters left unchanged.
    pub suffix_keep: usize,
    /// Replacement for every character in between.
    pub mask_char: char,
}

impl MaskPolicy {
    pub fn new(prefix_keep: usize, suffix_keep: usize, mask_char: char) -> Self {
        Self {
            prefix_keep,
            suffix_keep,
            mask_char,
        }
    }

    /// Redact `value` according to this policy.
    ///
    /// Lengths are counted in characters. A value no longer than
    /// `prefix_keep + suffix_keep` is returned unchanged; callers that need
    /// short values redacted must use a stricter policy.
    pub fn apply(&self, value: &str) -> String {
        let len = value.chars().count();
        let keep = self.prefix_keep.saturating_add(self.suffix_keep);
        if len <= keep {
            return value.to_owned();
        }

        let masked = len - keep;
        let mut out = String::with_capacity(value.len() + masked * self.mask_char.len_utf8());
        out.extend(value.chars().take(self.prefix_keep));
        out.extend(std::iter::repeat(self.mask_char).take(masked));
        out.extend(value.chars().skip(self.prefix_keep + masked));
        out
    }
}

impl Default for MaskPolicy {
    /// Show the last four characters only.
    fn default() -> Self {
        Self::new(0, 4, '*')
    }
}
