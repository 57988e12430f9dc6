#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use usmap_decoder::{CompressionMethod, PropertyTag, PropertyType, UsmapDecoder, UsmapVersion};
use usmap_tests::{property, schema, MappingBuilder};

// Fuzz target: build a mapping from a structured input, decode it, and
// check the decoded schemas equal the ones that went in.

#[derive(Arbitrary, Debug)]
enum FuzzType {
    Scalar(u8),
    Enum(Box<FuzzType>, u8),
    Struct(u8),
    Array(Box<FuzzType>),
    Set(Box<FuzzType>),
    Optional(Box<FuzzType>),
    Map(Box<FuzzType>, Box<FuzzType>),
}

impl FuzzType {
    fn to_property_type(&self, depth: usize) -> PropertyType {
        // Keep generated trees under the decoder's default depth limit.
        let leaf = |tag: u8| {
            let scalars: Vec<_> = PropertyTag::ALL.iter().filter(|t| t.is_scalar()).collect();
            PropertyType::Scalar(*scalars[usize::from(tag) % scalars.len()])
        };
        if depth >= 32 {
            return leaf(0);
        }
        let child = |t: &FuzzType| Box::new(t.to_property_type(depth + 1));
        match self {
            Self::Scalar(tag) => leaf(*tag),
            Self::Enum(inner, n) => PropertyType::Enum {
                inner: child(inner),
                enum_name: format!("E{n}"),
            },
            Self::Struct(n) => PropertyType::Struct {
                struct_name: format!("S{n}"),
            },
            Self::Array(inner) => PropertyType::Array { inner: child(inner) },
            Self::Set(inner) => PropertyType::Set { inner: child(inner) },
            Self::Optional(inner) => PropertyType::Optional { inner: child(inner) },
            Self::Map(k, v) => PropertyType::Map {
                key: child(k),
                value: child(v),
            },
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    version: u8,
    method: u8,
    properties: Vec<FuzzType>,
}

fuzz_target!(|input: Input| {
    let Ok(version) = UsmapVersion::from_raw(input.version % 6) else {
        return;
    };
    let method = match input.method % 3 {
        0 => CompressionMethod::None,
        1 => CompressionMethod::Brotli,
        _ => CompressionMethod::ZStandard,
    };
    let props = input
        .properties
        .iter()
        .take(64)
        .enumerate()
        .map(|(i, t)| property(i as u16, &format!("P{i}"), t.to_property_type(1)))
        .collect();

    let builder = MappingBuilder::new()
        .version(version)
        .compression(method)
        .schema(schema("Root", None, props));
    let doc = UsmapDecoder::decode(&builder.build()).expect("built mapping must decode");
    assert_eq!(doc.schemas, builder.schemas());
});
