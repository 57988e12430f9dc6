use usmap_wire::{ByteReader, FieldWidths};

use crate::capped_capacity;
use crate::error::TypeError;

/// Index value meaning "no name" (used for schemas without a supertype).
pub const NONE_INDEX: u32 = u32::MAX;

/// The interned string table every other table refers back into.
///
/// Position is identity: entry `i` is the name that index `i` means
/// everywhere else in the file, so file order is preserved exactly.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────┐
/// │ count   (u32) │                                      │
/// ├───────────────┼──────────────────────────────────────┤
/// │ len     (u8 / u16 from LongFName) │ bytes [len]      │
/// │ ...                                                  │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Decode the name table.
    ///
    /// # Errors
    ///
    /// [`TypeError::Wire`] if the table is truncated.
    pub fn decode(reader: &mut ByteReader<'_>, widths: FieldWidths) -> Result<Self, TypeError> {
        let count = reader.read_u32()?;
        let prefix = if widths.long_names { 2 } else { 1 };
        let mut names = Vec::with_capacity(capped_capacity(count, reader.remaining(), prefix));

        for _ in 0..count {
            let len = if widths.long_names {
                usize::from(reader.read_u16()?)
            } else {
                usize::from(reader.read_u8()?)
            };
            names.push(reader.read_string(len)?);
        }

        Ok(Self { names })
    }

    /// Look up a name by index.
    ///
    /// `what` and `offset` describe the referencing field for the error.
    ///
    /// # Errors
    ///
    /// [`TypeError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn resolve(&self, index: u32, what: &'static str, offset: usize) -> Result<&str, TypeError> {
        self.get(index).ok_or(TypeError::IndexOutOfRange {
            what,
            index,
            len: self.names.len(),
            offset,
        })
    }

    /// Read a `u32` index from `reader` and resolve it to an owned name.
    ///
    /// # Errors
    ///
    /// [`TypeError::Wire`] if the index is truncated,
    /// [`TypeError::IndexOutOfRange`] if it does not resolve.
    pub fn read_name(
        &self,
        reader: &mut ByteReader<'_>,
        what: &'static str,
    ) -> Result<String, TypeError> {
        let offset = reader.position();
        let index = reader.read_u32()?;
        self.resolve(index, what, offset).map(str::to_owned)
    }

    /// Like [`read_name`](Self::read_name), but [`NONE_INDEX`] yields `None`.
    ///
    /// # Errors
    ///
    /// Same as [`read_name`](Self::read_name).
    pub fn read_optional_name(
        &self,
        reader: &mut ByteReader<'_>,
        what: &'static str,
    ) -> Result<Option<String>, TypeError> {
        let offset = reader.position();
        let index = reader.read_u32()?;
        if index == NONE_INDEX {
            return Ok(None);
        }
        self.resolve(index, what, offset).map(|name| Some(name.to_owned()))
    }

    #[must_use]
    pub fn get(&self, index: u32) -> Option<&str> {
        let index = usize::try_from(index).ok()?;
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}
