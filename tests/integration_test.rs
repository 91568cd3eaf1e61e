//! Integration tests for meshparse
//!
//! These tests drive the full pipeline from descriptor XML on disk to NDJSON.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Cursor, Write};

use flate2::write::GzEncoder;
use flate2::Compression;
use meshparse::converter::{ConversionConfig, MeshConverter};
use meshparse::mesh::{parse, DescriptorRecord, DescriptorStreamer, MeshDate, MeshError};
use meshparse::writer::WriterConfig;
use proptest::prelude::*;
use tempfile::tempdir;

/// Build one descriptor record with the given tree numbers and concepts
fn descriptor_xml(ui: &str, name: &str, trees: &[String], concepts: &[(String, Vec<String>)]) -> String {
    let mut xml = format!(
        "  <DescriptorRecord DescriptorClass=\"1\">\n    <DescriptorUI>{ui}</DescriptorUI>\n    \
         <DescriptorName><String>{name}</String></DescriptorName>\n    \
         <DateCreated><Year>1999</Year><Month>01</Month><Day>01</Day></DateCreated>\n"
    );

    if !trees.is_empty() {
        xml.push_str("    <TreeNumberList>\n");
        for tree in trees {
            xml.push_str(&format!("      <TreeNumber>{tree}</TreeNumber>\n"));
        }
        xml.push_str("    </TreeNumberList>\n");
    }

    if !concepts.is_empty() {
        xml.push_str("    <ConceptList>\n");
        for (i, (concept_ui, terms)) in concepts.iter().enumerate() {
            let preferred = if i == 0 { "Y" } else { "N" };
            xml.push_str(&format!(
                "      <Concept PreferredConceptYN=\"{preferred}\">\n        <ConceptUI>{concept_ui}</ConceptUI>\n        \
                 <ConceptName><String>{concept_ui} name</String></ConceptName>\n        <TermList>\n"
            ));
            for term_ui in terms {
                xml.push_str(&format!(
                    "          <Term ConceptPreferredTermYN=\"N\" IsPermutedTermYN=\"N\">\
                     <TermUI>{term_ui}</TermUI><String>{term_ui} string</String></Term>\n"
                ));
            }
            xml.push_str("        </TermList>\n      </Concept>\n");
        }
        xml.push_str("    </ConceptList>\n");
    }

    xml.push_str("  </DescriptorRecord>\n");
    xml
}

fn document(records: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<!DOCTYPE DescriptorRecordSet SYSTEM \"desc.dtd\">\n\
         <DescriptorRecordSet LanguageCode=\"eng\">\n{}</DescriptorRecordSet>\n",
        records.concat()
    )
}

fn sample_document(n: usize) -> String {
    let records: Vec<String> = (1..=n)
        .map(|i| {
            descriptor_xml(
                &format!("D{i:06}"),
                &format!("Descriptor {i}"),
                &[format!("A{:02}.{:03}", i % 20, i)],
                &[(format!("M{i:07}"), vec![format!("T{i:06}")])],
            )
        })
        .collect();
    document(&records)
}

/// Convert a plain XML file and read it back line by line
#[test]
fn test_convert_plain_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("desc.xml");
    let output = dir.path().join("desc.ndjson");
    fs::write(&input, sample_document(50)).unwrap();

    let stats = MeshConverter::new().convert(&input, &output).unwrap();
    assert_eq!(stats.records_written, 50);
    assert_eq!(stats.records_skipped, 0);

    let reader = BufReader::new(File::open(&output).unwrap());
    let records: Vec<DescriptorRecord> = reader
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();

    assert_eq!(records.len(), 50);
    assert_eq!(records[0].descriptor_ui, "D000001");
    assert_eq!(records[49].descriptor_ui, "D000050");
    assert_eq!(records[0].date_created, Some(MeshDate::new(1999, 1, 1)));
    assert_eq!(records[0].concepts[0].terms[0].term_ui, "T000001");
}

/// Gzipped input is detected by content, not by extension
#[test]
fn test_gzip_input_detected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("desc.bin");
    let mut encoder = GzEncoder::new(File::create(&input).unwrap(), Compression::default());
    encoder.write_all(sample_document(10).as_bytes()).unwrap();
    encoder.finish().unwrap();

    let streamer = DescriptorStreamer::open(&input).unwrap();
    let records: Vec<_> = streamer.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 10);
}

/// Compressed output follows the output extension
#[test]
fn test_gzip_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("desc.xml");
    let output = dir.path().join("desc.ndjson.gz");
    fs::write(&input, sample_document(5)).unwrap();

    let config = ConversionConfig {
        writer_config: WriterConfig::for_path(&output),
        ..Default::default()
    };
    MeshConverter::with_config(config).convert(&input, &output).unwrap();

    let decoder = flate2::read::GzDecoder::new(File::open(&output).unwrap());
    assert_eq!(BufReader::new(decoder).lines().count(), 5);
}

/// A truncated file yields the complete records before the break, then a parse error
#[test]
fn test_truncated_file() {
    let full = sample_document(3);
    let cut = full.find("<DescriptorUI>D000003").unwrap();
    let truncated = &full[..cut];

    let results: Vec<_> = parse(Cursor::new(truncated.as_bytes())).collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(MeshError::Parse(_))));
}

proptest! {
    /// N boundary elements always yield N records in document order, with
    /// every sequence field in source order
    #[test]
    fn test_count_and_order_preserved(
        shapes in prop::collection::vec(
            (prop::collection::vec(0u32..1000, 0..4), prop::collection::vec(0usize..4, 0..4)),
            0..20,
        )
    ) {
        let records: Vec<String> = shapes
            .iter()
            .enumerate()
            .map(|(i, (trees, concepts))| {
                let trees: Vec<String> = trees.iter().map(|t| format!("C{:02}.{:03}", t % 23, t)).collect();
                let concepts: Vec<(String, Vec<String>)> = concepts
                    .iter()
                    .enumerate()
                    .map(|(c, n_terms)| {
                        let terms = (0..*n_terms).map(|t| format!("T{i}x{c}x{t}")).collect();
                        (format!("M{i}x{c}"), terms)
                    })
                    .collect();
                descriptor_xml(&format!("D{i:06}"), &format!("Name {i}"), &trees, &concepts)
            })
            .collect();
        let xml = document(&records);

        let parsed: Vec<DescriptorRecord> = parse(Cursor::new(xml.as_bytes()))
            .collect::<Result<_, _>>()
            .unwrap();

        prop_assert_eq!(parsed.len(), shapes.len());
        for (i, (record, (trees, concepts))) in parsed.iter().zip(shapes.iter()).enumerate() {
            prop_assert_eq!(&record.descriptor_ui, &format!("D{i:06}"));

            let expected_trees: Vec<String> = trees.iter().map(|t| format!("C{:02}.{:03}", t % 23, t)).collect();
            prop_assert_eq!(&record.tree_numbers, &expected_trees);

            prop_assert_eq!(record.concepts.len(), concepts.len());
            for (c, (concept, n_terms)) in record.concepts.iter().zip(concepts.iter()).enumerate() {
                prop_assert_eq!(&concept.concept_ui, &format!("M{i}x{c}"));
                prop_assert_eq!(concept.is_preferred, c == 0);
                let term_uis: Vec<String> = concept.terms.iter().map(|t| t.term_ui.clone()).collect();
                let expected: Vec<String> = (0..*n_terms).map(|t| format!("T{i}x{c}x{t}")).collect();
                prop_assert_eq!(term_uis, expected);
            }
        }
    }

    /// Two independent streams over identical bytes produce identical output
    #[test]
    fn test_parsing_is_deterministic(n in 0usize..15) {
        let xml = sample_document(n);
        let first: Vec<DescriptorRecord> = parse(Cursor::new(xml.as_bytes())).collect::<Result<_, _>>().unwrap();
        let second: Vec<DescriptorRecord> = parse(Cursor::new(xml.clone().into_bytes())).collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
