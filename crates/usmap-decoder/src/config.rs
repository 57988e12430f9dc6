use usmap_types::DEFAULT_MAX_DEPTH;

/// Default cap on the declared uncompressed body size (256 MiB).
pub const DEFAULT_MAX_UNCOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// Limits applied while decoding untrusted mapping files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Deepest property type tree accepted; the root node is depth 1.
    pub max_property_depth: usize,
    /// Largest `uncompressed_size` a header may declare. Checked before
    /// any provider runs.
    pub max_uncompressed_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_property_depth: DEFAULT_MAX_DEPTH,
            max_uncompressed_size: DEFAULT_MAX_UNCOMPRESSED_SIZE,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_max_property_depth(mut self, depth: usize) -> Self {
        self.max_property_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_uncompressed_size(mut self, size: usize) -> Self {
        self.max_uncompressed_size = size;
        self
    }
}
