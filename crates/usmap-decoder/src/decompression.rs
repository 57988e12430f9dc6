use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use usmap_wire::CompressionMethod;

/// Error type returned by a [`DecompressionProvider`].
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Input buffer size handed to the brotli decoder.
const BROTLI_BUFFER_SIZE: usize = 4096;

/// Upper bound on the output buffer reserved before decoding starts.
const MAX_INITIAL_CAPACITY: usize = 16 * 1024 * 1024;

/// A pluggable decompressor for one [`CompressionMethod`].
///
/// Providers return the decompressed body. The decoder checks the output
/// length against the header afterwards, so a provider may return early
/// once it has produced more than `expected_len` bytes.
///
/// Providers may block; a host that needs a timeout, or that wraps a
/// non-thread-safe native handle, enforces that inside its provider.
///
/// Any `Fn(&[u8], usize) -> Result<Vec<u8>, ProviderError>` closure is a
/// provider:
///
/// ```rust
/// use usmap_decoder::{CompressionMethod, ProviderError, ProviderRegistry};
///
/// let mut registry = ProviderRegistry::default();
/// registry.register(
///     CompressionMethod::Oodle,
///     |_: &[u8], _: usize| -> Result<Vec<u8>, ProviderError> {
///         Err("oodle is not available here".into())
///     },
/// );
/// assert!(registry.get(CompressionMethod::Oodle).is_some());
/// ```
pub trait DecompressionProvider: Send + Sync {
    /// Decompress `compressed`, which should inflate to `expected_len` bytes.
    ///
    /// # Errors
    ///
    /// Any codec failure, boxed.
    fn decompress(&self, compressed: &[u8], expected_len: usize)
    -> Result<Vec<u8>, ProviderError>;
}

impl<F> DecompressionProvider for F
where
    F: Fn(&[u8], usize) -> Result<Vec<u8>, ProviderError> + Send + Sync,
{
    fn decompress(
        &self,
        compressed: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, ProviderError> {
        self(compressed, expected_len)
    }
}

// ── Built-in providers ─────────────────────────────────────────────────

/// Provider for [`CompressionMethod::None`]: the payload is the body.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityProvider;

impl DecompressionProvider for IdentityProvider {
    fn decompress(&self, compressed: &[u8], _: usize) -> Result<Vec<u8>, ProviderError> {
        Ok(compressed.to_vec())
    }
}

/// Provider for [`CompressionMethod::Brotli`], backed by the `brotli` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrotliProvider;

impl DecompressionProvider for BrotliProvider {
    fn decompress(
        &self,
        compressed: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, ProviderError> {
        let decoder = brotli::Decompressor::new(compressed, BROTLI_BUFFER_SIZE);
        read_bounded(decoder, expected_len)
    }
}

/// Provider for [`CompressionMethod::ZStandard`], backed by the `zstd` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZstdProvider;

impl DecompressionProvider for ZstdProvider {
    fn decompress(
        &self,
        compressed: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, ProviderError> {
        let decoder = zstd::stream::read::Decoder::new(compressed)?;
        read_bounded(decoder, expected_len)
    }
}

/// Read at most `expected_len + 1` bytes: enough for the caller to see an
/// oversized stream without inflating all of it.
fn read_bounded<R: Read>(reader: R, expected_len: usize) -> Result<Vec<u8>, ProviderError> {
    let limit = u64::try_from(expected_len)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut out = Vec::with_capacity(expected_len.min(MAX_INITIAL_CAPACITY));
    reader.take(limit).read_to_end(&mut out)?;
    Ok(out)
}

// ── Registry ───────────────────────────────────────────────────────────

/// Maps each [`CompressionMethod`] to the provider that handles it.
///
/// ```text
/// ┌───────────┬──────────────────────────────┐
/// │ Method    │ Default provider             │
/// ├───────────┼──────────────────────────────┤
/// │ None      │ IdentityProvider             │
/// │ Oodle     │ (none, host must register)   │
/// │ Brotli    │ BrotliProvider               │
/// │ ZStandard │ ZstdProvider                 │
/// └───────────┴──────────────────────────────┘
/// ```
pub struct ProviderRegistry {
    providers: HashMap<CompressionMethod, Box<dyn DecompressionProvider>>,
}

impl ProviderRegistry {
    /// A registry with no providers at all, not even for `None`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register `provider` for `method`, replacing any previous one.
    pub fn register<P>(&mut self, method: CompressionMethod, provider: P) -> &mut Self
    where
        P: DecompressionProvider + 'static,
    {
        self.providers.insert(method, Box::new(provider));
        self
    }

    /// Remove the provider for `method`, if any.
    pub fn unregister(&mut self, method: CompressionMethod) -> &mut Self {
        self.providers.remove(&method);
        self
    }

    #[must_use]
    pub fn get(&self, method: CompressionMethod) -> Option<&dyn DecompressionProvider> {
        self.providers.get(&method).map(Box::as_ref)
    }

    #[must_use]
    pub fn supports(&self, method: CompressionMethod) -> bool {
        self.providers.contains_key(&method)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(CompressionMethod::None, IdentityProvider)
            .register(CompressionMethod::Brotli, BrotliProvider)
            .register(CompressionMethod::ZStandard, ZstdProvider);
        registry
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods: Vec<_> = CompressionMethod::ALL
            .into_iter()
            .filter(|m| self.supports(*m))
            .collect();
        f.debug_struct("ProviderRegistry")
            .field("methods", &methods)
            .finish()
    }
}
