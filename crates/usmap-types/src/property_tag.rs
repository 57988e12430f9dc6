// ── Macro for wire-byte enum boilerplate ──────────────────────────────
//
// Each tag maps to one wire byte and to the engine's `<Name>Property`
// class name. The macro keeps the table below as the single source of
// truth for both conversions.

macro_rules! property_tags {
  (
    $(#[$meta:meta])*
    pub enum $name:ident {
      $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    pub enum $name {
      $( $(#[$vmeta])* $variant ),+
    }

    impl $name {
      /// Every known tag, in wire order.
      pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

      /// Encode this tag as its wire byte.
      #[must_use]
      pub fn to_wire_byte(self) -> u8 {
        match self {
          $( Self::$variant => $wire ),+
        }
      }

      /// Decode a wire byte, or `None` if it is not a known tag.
      #[must_use]
      pub fn from_wire_byte(value: u8) -> Option<Self> {
        match value {
          $( $wire => Some(Self::$variant), )+
          _ => None,
        }
      }

      /// Short name, e.g. `"Int"`.
      #[must_use]
      pub fn short_name(self) -> &'static str {
        match self {
          $( Self::$variant => stringify!($variant) ),+
        }
      }

      /// Engine class name, e.g. `"IntProperty"`.
      #[must_use]
      pub fn property_name(self) -> &'static str {
        match self {
          $( Self::$variant => concat!(stringify!($variant), "Property") ),+
        }
      }
    }
  };
}

property_tags! {
  /// Property type tags as they appear on the wire.
  ///
  /// ```text
  /// ┌──────┬───────────────────┬──────┬───────────────────┐
  /// │ Wire │ Tag               │ Wire │ Tag               │
  /// ├──────┼───────────────────┼──────┼───────────────────┤
  /// │ 0    │ Byte              │ 16   │ AssetObject       │
  /// │ 1    │ Bool              │ 17   │ SoftObject        │
  /// │ 2    │ Int               │ 18   │ UInt64            │
  /// │ 3    │ Float             │ 19   │ UInt32            │
  /// │ 4    │ Object            │ 20   │ UInt16            │
  /// │ 5    │ Name              │ 21   │ Int64             │
  /// │ 6    │ Delegate          │ 22   │ Int16             │
  /// │ 7    │ Double            │ 23   │ Int8              │
  /// │ 8    │ Array      (1)    │ 24   │ Map        (2)    │
  /// │ 9    │ Struct     (name) │ 25   │ Set        (1)    │
  /// │ 10   │ Str               │ 26   │ Enum   (1 + name) │
  /// │ 11   │ Text              │ 27   │ FieldPath         │
  /// │ 12   │ Interface         │ 28   │ Optional   (1)    │
  /// │ 13   │ MulticastDelegate │ 29   │ Utf8Str           │
  /// │ 14   │ WeakObject        │ 30   │ AnsiStr           │
  /// │ 15   │ LazyObject        │      │                   │
  /// └──────┴───────────────────┴──────┴───────────────────┘
  /// ```
  ///
  /// `(n)` marks tags followed by `n` nested property types; `name`
  /// marks a trailing `u32` name-table index.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  #[cfg_attr(feature = "serde", derive(serde::Serialize))]
  pub enum PropertyTag {
    Byte = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    Object = 4,
    Name = 5,
    Delegate = 6,
    Double = 7,
    Array = 8,
    Struct = 9,
    Str = 10,
    Text = 11,
    Interface = 12,
    MulticastDelegate = 13,
    WeakObject = 14,
    LazyObject = 15,
    AssetObject = 16,
    SoftObject = 17,
    UInt64 = 18,
    UInt32 = 19,
    UInt16 = 20,
    Int64 = 21,
    Int16 = 22,
    Int8 = 23,
    Map = 24,
    Set = 25,
    Enum = 26,
    FieldPath = 27,
    Optional = 28,
    Utf8Str = 29,
    AnsiStr = 30,
  }
}

impl PropertyTag {
  /// Whether the tag is a leaf with no trailing bytes.
  #[must_use]
  pub fn is_scalar(self) -> bool {
    !matches!(
      self,
      Self::Enum | Self::Struct | Self::Array | Self::Set | Self::Optional | Self::Map
    )
  }
}
