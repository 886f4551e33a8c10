use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Widest digit a counting pass accepts: 2^16 buckets.
pub const MAX_RADIX_BITS: u32 = 16;

/// Tuning for [crate::sort::radix].
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(default)]
pub struct RadixConfig {
    /// Bits per digit. 8 gives base 256, one byte per pass.
    pub radix_bits: u32,
    /// Inputs shorter than this are sorted on the calling thread even in
    /// parallel mode.
    pub parallel_min_len: usize,
}

impl RadixConfig {
    pub fn with_radix_bits(radix_bits: u32) -> Self {
        Self { radix_bits, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.radix_bits == 0 || self.radix_bits > MAX_RADIX_BITS {
            return Err(Error::InvalidRadix {
                bits: self.radix_bits,
                max: MAX_RADIX_BITS,
            });
        }
        Ok(())
    }

    /// Number of buckets per counting pass.
    pub fn buckets(&self) -> usize {
        1 << self.radix_bits
    }
}

impl Default for RadixConfig {
    fn default() -> Self {
        Self {
            radix_bits: 8,
            parallel_min_len: 1 << 16,
        }
    }
}
