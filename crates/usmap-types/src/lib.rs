#![warn(clippy::pedantic)]

pub mod enum_def;
pub mod error;
pub mod names;
pub mod property;
pub mod property_tag;
pub mod schema;

pub use enum_def::EnumDef;
pub use error::TypeError;
pub use names::{NONE_INDEX, NameTable};
pub use property::{DEFAULT_MAX_DEPTH, PropertyType};
pub use property_tag::PropertyTag;
pub use schema::{PropertyDef, StructSchema};

/// Pre-allocation size for a table of `count` entries, capped by how many
/// entries of at least `min_entry_size` bytes could still fit in the input.
pub(crate) fn capped_capacity(count: u32, remaining: usize, min_entry_size: usize) -> usize {
  usize::try_from(count)
    .unwrap_or(usize::MAX)
    .min(remaining / min_entry_size.max(1))
}
