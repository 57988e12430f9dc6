use usmap_wire::WireError;

/// Errors raised while decoding the body tables of a mapping file.
///
/// These sit one level above [`WireError`]: the bytes were there, but
/// what they say does not resolve. Wire-level failures inside a table
/// (a truncated name, a missing count) are wrapped unchanged.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │ TypeError                                               │
/// │   ├── IndexOutOfRange        name index >= table length │
/// │   ├── UnknownPropertyType    tag byte not in the grammar│
/// │   ├── RecursionLimitExceeded type tree nested too deep  │
/// │   └── Wire(WireError)        truncated table data       │
/// └─────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// A name-table reference does not resolve.
  ///
  /// `what` names the field holding the reference (e.g. `"super type"`),
  /// `offset` is where the index was read.
  #[error("{what} index {index} out of range (name table has {len} entries) at offset {offset}")]
  IndexOutOfRange {
    what: &'static str,
    index: u32,
    len: usize,
    offset: usize,
  },

  /// A property-type tag byte is not part of the type grammar.
  #[error("unknown property type tag {value} at offset {offset}")]
  UnknownPropertyType { value: u8, offset: usize },

  /// Property types nest deeper than the configured limit.
  #[error("property type nesting exceeds limit of {limit} at offset {offset}")]
  RecursionLimitExceeded { limit: usize, offset: usize },

  #[error(transparent)]
  Wire(#[from] WireError),
}
