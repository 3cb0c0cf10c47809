use crate::{OligoError, ADDRESS_BITS};

/// Runtime configuration for the codec.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Maximum block size in bytes.
    pub block_size: usize,
    /// Address ceiling per block; the 19-bit field caps the effective
    /// ceiling at 524287 regardless of this value.
    pub max_address: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            block_size: 5 * 1024,
            max_address: 524_288,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), OligoError> {
        if self.block_size == 0 {
            return Err(OligoError::Config("block size must be non-zero".into()));
        }
        if self.max_address == 0 {
            return Err(OligoError::Config("address ceiling must be non-zero".into()));
        }
        Ok(())
    }

    /// Ceiling clamped to what the 19-bit address field can represent.
    pub fn effective_max_address(&self) -> u32 {
        self.max_address.min((1 << ADDRESS_BITS) - 1)
    }
}
