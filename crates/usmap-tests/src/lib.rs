//! Fixture builder for `.usmap` integration tests and benches.
//!
//! [`MappingBuilder`] takes the same data model the decoder produces
//! ([`EnumDef`], [`StructSchema`], [`PropertyType`]) and writes it back out
//! as a mapping file, interning every name into the name table on the way.
//! A decode of the built bytes should therefore compare equal to the
//! tables that went in.
//!
//! ```text
//!   MappingBuilder ──body()──▶ names | enums | schemas
//!                  ──build()─▶ header | compress(body)
//! ```
//!
//! Lower-level helpers ([`write_header`], [`compress`]) are public for
//! tests that need to hand-craft broken files.

#![allow(clippy::pedantic)]

use std::collections::HashMap;
use std::io::{Cursor, Write};

use usmap_types::{EnumDef, NONE_INDEX, PropertyDef, PropertyTag, PropertyType, StructSchema};
use usmap_wire::header::USMAP_MAGIC;
use usmap_wire::{CompressionMethod, UsmapVersion};

pub use usmap_decoder;
pub use usmap_types;
pub use usmap_wire;

// ── Data model shorthands ─────────────────────────────────────────────────────

/// A scalar property type.
pub fn scalar(tag: PropertyTag) -> PropertyType {
    PropertyType::Scalar(tag)
}

pub fn struct_of(name: &str) -> PropertyType {
    PropertyType::Struct {
        struct_name: name.to_string(),
    }
}

pub fn enum_of(inner: PropertyType, name: &str) -> PropertyType {
    PropertyType::Enum {
        inner: Box::new(inner),
        enum_name: name.to_string(),
    }
}

pub fn array_of(inner: PropertyType) -> PropertyType {
    PropertyType::Array {
        inner: Box::new(inner),
    }
}

pub fn set_of(inner: PropertyType) -> PropertyType {
    PropertyType::Set {
        inner: Box::new(inner),
    }
}

pub fn optional_of(inner: PropertyType) -> PropertyType {
    PropertyType::Optional {
        inner: Box::new(inner),
    }
}

pub fn map_of(key: PropertyType, value: PropertyType) -> PropertyType {
    PropertyType::Map {
        key: Box::new(key),
        value: Box::new(value),
    }
}

/// A plain (array size 1) property.
pub fn property(slot: u16, name: &str, ty: PropertyType) -> PropertyDef {
    PropertyDef {
        name: name.to_string(),
        schema_index: slot,
        array_size: 1,
        ty,
    }
}

/// A schema whose declared count equals its serialized properties.
pub fn schema(name: &str, super_type: Option<&str>, properties: Vec<PropertyDef>) -> StructSchema {
    StructSchema {
        name: name.to_string(),
        super_type: super_type.map(str::to_string),
        declared_property_count: u16::try_from(properties.len()).expect("too many properties"),
        properties,
    }
}

// ── Byte writer ───────────────────────────────────────────────────────────────

/// Little-endian byte sink with chainable writes.
#[derive(Clone, Debug, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.0.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

// ── Header and compression ────────────────────────────────────────────────────

/// Header field values, including ones the decoder should reject.
#[derive(Clone, Debug)]
pub struct HeaderSpec {
    pub magic: u16,
    pub version: u8,
    /// `Some(n)` writes a nonzero versioning flag followed by the legacy
    /// block with `n` custom version entries. Ignored for versions that
    /// carry no flag.
    pub custom_versions: Option<i32>,
    pub compression: u8,
    pub compressed_size: i32,
    pub uncompressed_size: i32,
}

impl HeaderSpec {
    pub fn new(version: UsmapVersion, compression: CompressionMethod) -> Self {
        Self {
            magic: USMAP_MAGIC,
            version: version.raw(),
            custom_versions: None,
            compression: compression.raw(),
            compressed_size: 0,
            uncompressed_size: 0,
        }
    }
}

/// Write a header exactly as described by `spec`.
pub fn write_header(spec: &HeaderSpec) -> Vec<u8> {
    let mut out = Bytes::default();
    out.u16(spec.magic).u8(spec.version);
    if spec.version > UsmapVersion::PackageVersioning.raw() {
        match spec.custom_versions {
            Some(count) => {
                out.i32(1).raw(&[0x11; 8]).i32(count);
                for i in 0..count.max(0) {
                    out.raw(&[0xA0 | (i as u8 & 0x0F); 16]).i32(i);
                }
            }
            None => {
                out.i32(0);
            }
        }
    }
    out.u8(spec.compression)
        .i32(spec.compressed_size)
        .i32(spec.uncompressed_size);
    out.into_vec()
}

/// Compress `body` with one of the open codecs.
///
/// # Panics
///
/// For [`CompressionMethod::Oodle`], which has no open encoder.
pub fn compress(method: CompressionMethod, body: &[u8]) -> Vec<u8> {
    match method {
        CompressionMethod::None => body.to_vec(),
        CompressionMethod::ZStandard => {
            zstd::encode_all(Cursor::new(body), 3).expect("zstd compression failed")
        }
        CompressionMethod::Brotli => {
            let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, 5, 22);
            writer.write_all(body).expect("brotli compression failed");
            writer.into_inner()
        }
        CompressionMethod::Oodle => panic!("no Oodle encoder available in tests"),
    }
}

/// Header for `body` compressed as `payload`, followed by `payload`.
pub fn wrap(version: UsmapVersion, method: CompressionMethod, body: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut spec = HeaderSpec::new(version, method);
    spec.compressed_size = i32::try_from(payload.len()).expect("payload too large");
    spec.uncompressed_size = i32::try_from(body.len()).expect("body too large");
    let mut file = write_header(&spec);
    file.extend_from_slice(payload);
    file
}

// ── Mapping builder ───────────────────────────────────────────────────────────

/// Builds a complete mapping file from decoded-model values.
#[derive(Clone, Debug)]
pub struct MappingBuilder {
    version: UsmapVersion,
    compression: CompressionMethod,
    custom_versions: Option<i32>,
    names: Vec<String>,
    index: HashMap<String, u32>,
    enums: Vec<EnumDef>,
    schemas: Vec<StructSchema>,
}

impl Default for MappingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self {
            version: UsmapVersion::LATEST,
            compression: CompressionMethod::None,
            custom_versions: None,
            names: Vec::new(),
            index: HashMap::new(),
            enums: Vec::new(),
            schemas: Vec::new(),
        }
    }

    pub fn version(mut self, version: UsmapVersion) -> Self {
        self.version = version;
        self
    }

    pub fn compression(mut self, method: CompressionMethod) -> Self {
        self.compression = method;
        self
    }

    /// Emit a legacy versioning block with `count` custom versions.
    pub fn legacy_versioning(mut self, count: i32) -> Self {
        self.custom_versions = Some(count);
        self
    }

    /// Intern a name that nothing else references.
    pub fn name(mut self, name: &str) -> Self {
        self.intern(name);
        self
    }

    pub fn enum_def(mut self, name: &str, members: &[&str]) -> Self {
        self.enums.push(EnumDef {
            name: name.to_string(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
        });
        self
    }

    pub fn schema(mut self, schema: StructSchema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }

    pub fn schemas(&self) -> &[StructSchema] {
        &self.schemas
    }

    /// The decompressed body: name table, enum table, schema table.
    ///
    /// Names are interned in the order they are first seen: explicit
    /// [`name`](Self::name) calls, then enums, then schemas.
    pub fn body(&self) -> Vec<u8> {
        let mut builder = self.clone();
        let enums = builder.encode_enums();
        let schemas = builder.encode_schemas();

        let mut out = Bytes::default();
        out.u32(u32::try_from(builder.names.len()).expect("too many names"));
        for name in &builder.names {
            if self.version >= UsmapVersion::LongFName {
                out.u16(u16::try_from(name.len()).expect("name too long"));
            } else {
                out.u8(u8::try_from(name.len()).expect("name too long for u8 prefix"));
            }
            out.raw(name.as_bytes());
        }
        out.raw(&enums).raw(&schemas);
        out.into_vec()
    }

    /// The names in table order, as the decoder will see them.
    pub fn name_table(&self) -> Vec<String> {
        let mut builder = self.clone();
        builder.encode_enums();
        builder.encode_schemas();
        builder.names
    }

    /// The whole file, compressed with the configured method.
    pub fn build(&self) -> Vec<u8> {
        let body = self.body();
        let payload = compress(self.compression, &body);
        self.build_with_payload(&body, &payload)
    }

    /// The whole file with a caller-supplied payload, e.g. for Oodle.
    pub fn build_with_payload(&self, body: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut spec = HeaderSpec::new(self.version, self.compression);
        spec.custom_versions = self.custom_versions;
        spec.compressed_size = i32::try_from(payload.len()).expect("payload too large");
        spec.uncompressed_size = i32::try_from(body.len()).expect("body too large");
        let mut file = write_header(&spec);
        file.extend_from_slice(payload);
        file
    }

    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = u32::try_from(self.names.len()).expect("too many names");
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    fn encode_enums(&mut self) -> Vec<u8> {
        let mut out = Bytes::default();
        out.u32(u32::try_from(self.enums.len()).expect("too many enums"));
        for def in self.enums.clone() {
            out.u32(self.intern(&def.name));
            if self.version >= UsmapVersion::LargeEnums {
                out.u16(u16::try_from(def.members.len()).expect("too many members"));
            } else {
                out.u8(u8::try_from(def.members.len()).expect("too many members for u8 count"));
            }
            for member in &def.members {
                out.u32(self.intern(member));
            }
        }
        out.into_vec()
    }

    fn encode_schemas(&mut self) -> Vec<u8> {
        let mut out = Bytes::default();
        out.u32(u32::try_from(self.schemas.len()).expect("too many schemas"));
        for schema in self.schemas.clone() {
            out.u32(self.intern(&schema.name));
            let super_index = match &schema.super_type {
                Some(name) => self.intern(name),
                None => NONE_INDEX,
            };
            out.u32(super_index)
                .u16(schema.declared_property_count)
                .u16(u16::try_from(schema.properties.len()).expect("too many properties"));
            for prop in &schema.properties {
                out.u16(prop.schema_index).u8(prop.array_size);
                out.u32(self.intern(&prop.name));
                self.encode_type(&prop.ty, &mut out);
            }
        }
        out.into_vec()
    }

    fn encode_type(&mut self, ty: &PropertyType, out: &mut Bytes) {
        out.u8(ty.tag().to_wire_byte());
        match ty {
            PropertyType::Scalar(_) => {}
            PropertyType::Enum { inner, enum_name } => {
                self.encode_type(inner, out);
                out.u32(self.intern(enum_name));
            }
            PropertyType::Struct { struct_name } => {
                out.u32(self.intern(struct_name));
            }
            PropertyType::Array { inner }
            | PropertyType::Set { inner }
            | PropertyType::Optional { inner } => self.encode_type(inner, out),
            PropertyType::Map { key, value } => {
                self.encode_type(key, out);
                self.encode_type(value, out);
            }
        }
    }
}

/// A mapping with a bit of everything: inheritance, every container kind,
/// an enum-typed property, and a static array.
pub fn sample_mapping() -> MappingBuilder {
    use PropertyTag::*;

    let mut color = property(2, "Tint", enum_of(scalar(Byte), "EColor"));
    color.array_size = 4;

    MappingBuilder::new()
        .enum_def("EColor", &["Red", "Green", "Blue"])
        .enum_def("EMovementMode", &["Walking", "Falling", "Flying"])
        .schema(schema(
            "Vector",
            None,
            vec![
                property(0, "X", scalar(Double)),
                property(1, "Y", scalar(Double)),
                property(2, "Z", scalar(Double)),
            ],
        ))
        .schema(schema("Object", None, vec![]))
        .schema(StructSchema {
            declared_property_count: 12,
            ..schema(
                "Actor",
                Some("Object"),
                vec![
                    property(0, "Location", struct_of("Vector")),
                    property(1, "Tags", array_of(scalar(Name))),
                    color,
                    property(
                        5,
                        "Attachments",
                        map_of(scalar(Name), array_of(struct_of("Vector"))),
                    ),
                    property(7, "Owner", optional_of(scalar(SoftObject))),
                    property(9, "Layers", set_of(scalar(Int))),
                ],
            )
        })
        .schema(schema(
            "Pawn",
            Some("Actor"),
            vec![
                property(0, "Mode", enum_of(scalar(Byte), "EMovementMode")),
                property(1, "DisplayName", scalar(Utf8Str)),
            ],
        ))
}
