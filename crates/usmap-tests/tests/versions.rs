//! Version-gated layout: length prefix widths, enum count widths, and the
//! legacy versioning block.

use usmap_decoder::{UsmapDecoder, UsmapVersion};
use usmap_tests::{MappingBuilder, sample_mapping};

const ALL_VERSIONS: [UsmapVersion; 6] = [
    UsmapVersion::Initial,
    UsmapVersion::PackageVersioning,
    UsmapVersion::LongFName,
    UsmapVersion::LargeEnums,
    UsmapVersion::ExplicitEnumValues,
    UsmapVersion::Utf8AndAnsiStrProps,
];

#[test]
fn sample_decodes_at_every_version() {
    for version in ALL_VERSIONS {
        let builder = sample_mapping().version(version);
        let doc = UsmapDecoder::decode(&builder.build())
            .unwrap_or_else(|e| panic!("{version:?}: {e}"));
        assert_eq!(doc.header.version, version);
        assert_eq!(doc.schemas, builder.schemas(), "{version:?}");
        assert_eq!(doc.enums, builder.enums(), "{version:?}");
    }
}

#[test]
fn body_widths_shrink_before_long_names_and_large_enums() {
    let build = |v| {
        MappingBuilder::new()
            .version(v)
            .enum_def("E", &["A", "B"])
            .body()
    };
    let initial = build(UsmapVersion::Initial);
    let long_names = build(UsmapVersion::LongFName);
    let large_enums = build(UsmapVersion::LargeEnums);

    // Three names: one extra prefix byte each once names are long.
    assert_eq!(long_names.len(), initial.len() + 3);
    // One enum: one extra count byte once enums are large.
    assert_eq!(large_enums.len(), long_names.len() + 1);
}

#[test]
fn long_names_need_long_f_name() {
    let long = "N".repeat(300);
    let builder = MappingBuilder::new()
        .version(UsmapVersion::LongFName)
        .name(&long);
    let doc = UsmapDecoder::decode(&builder.build()).unwrap();
    assert_eq!(doc.names.get(0), Some(long.as_str()));
}

#[test]
fn large_enums_need_large_enums() {
    let members: Vec<String> = (0..300).map(|i| format!("Value{i}")).collect();
    let refs: Vec<&str> = members.iter().map(String::as_str).collect();
    let builder = MappingBuilder::new()
        .version(UsmapVersion::LargeEnums)
        .enum_def("EBig", &refs);
    let doc = UsmapDecoder::decode(&builder.build()).unwrap();
    assert_eq!(doc.enum_def("EBig").unwrap().members.len(), 300);
}

#[test]
fn legacy_versioning_block_is_skipped() {
    for version in [UsmapVersion::LongFName, UsmapVersion::LATEST] {
        for count in [0, 1, 5] {
            let builder = sample_mapping().version(version).legacy_versioning(count);
            let doc = UsmapDecoder::decode(&builder.build())
                .unwrap_or_else(|e| panic!("{version:?} with {count} custom versions: {e}"));
            assert!(doc.header.has_versioning);
            assert_eq!(doc.schemas, builder.schemas());
        }
    }
}

#[test]
fn package_versioning_files_carry_no_flag() {
    // At PackageVersioning the flag is not written, so a requested legacy
    // block is dropped by the builder and the header stays short.
    let plain = sample_mapping().version(UsmapVersion::PackageVersioning).build();
    let flagged = sample_mapping()
        .version(UsmapVersion::PackageVersioning)
        .legacy_versioning(3)
        .build();
    assert_eq!(plain, flagged);
    let doc = UsmapDecoder::decode(&plain).unwrap();
    assert!(!doc.header.has_versioning);
}
