use crate::error::WireError;

/// `.usmap` format versions. Each version gates one wire feature, and
/// versions only ever grow.
///
/// ```text
/// ┌──────┬──────────────────────┬───────────────────────────────────────┐
/// │ Wire │ Variant              │ Feature                               │
/// ├──────┼──────────────────────┼───────────────────────────────────────┤
/// │ 0    │ Initial              │                                       │
/// │ 1    │ PackageVersioning    │ legacy package versioning block       │
/// │ 2    │ LongFName            │ u16 name lengths (was u8)             │
/// │ 3    │ LargeEnums           │ u16 enum member counts (was u8)       │
/// │ 4    │ ExplicitEnumValues   │ explicit enum values (not modelled)   │
/// │ 5    │ Utf8AndAnsiStrProps  │ Utf8Str / AnsiStr property tags       │
/// └──────┴──────────────────────┴───────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UsmapVersion {
    Initial = 0,
    PackageVersioning = 1,
    LongFName = 2,
    LargeEnums = 3,
    ExplicitEnumValues = 4,
    Utf8AndAnsiStrProps = 5,
}

impl UsmapVersion {
    /// The newest version this crate understands.
    pub const LATEST: Self = Self::Utf8AndAnsiStrProps;

    /// Parse a version byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedVersion`] if `raw` is newer than [`Self::LATEST`].
    pub fn from_raw(raw: u8) -> Result<Self, WireError> {
        match raw {
            0 => Ok(Self::Initial),
            1 => Ok(Self::PackageVersioning),
            2 => Ok(Self::LongFName),
            3 => Ok(Self::LargeEnums),
            4 => Ok(Self::ExplicitEnumValues),
            5 => Ok(Self::Utf8AndAnsiStrProps),
            other => Err(WireError::UnsupportedVersion {
                version: other,
                latest: Self::LATEST.raw(),
            }),
        }
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Whether the header carries the `hasVersioning` flag.
    #[must_use]
    pub fn has_versioning_flag(self) -> bool {
        self > Self::PackageVersioning
    }

    /// Field widths for the body tables, decided once per file.
    #[must_use]
    pub fn field_widths(self) -> FieldWidths {
        FieldWidths {
            long_names: self >= Self::LongFName,
            large_enums: self >= Self::LargeEnums,
        }
    }
}

/// Version-dependent widths of the body's length and count prefixes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldWidths {
    /// Name lengths are `u16` instead of `u8`.
    pub long_names: bool,
    /// Enum member counts are `u16` instead of `u8`.
    pub large_enums: bool,
}
