use super::*;
use crate::mesh::{parse, DescriptorRecord};
use std::io::{BufRead, BufReader, Read};

const XML: &str = r#"<DescriptorRecordSet>
  <DescriptorRecord>
    <DescriptorUI>D000001</DescriptorUI>
    <DescriptorName><String>Calcimycin</String></DescriptorName>
    <ConceptList>
      <Concept PreferredConceptYN="Y">
        <ConceptUI>M0000001</ConceptUI>
        <ConceptName><String>Calcimycin</String></ConceptName>
        <ScopeNote>An ionophorous, polyether antibiotic
   from Streptomyces chartreusensis.</ScopeNote>
      </Concept>
    </ConceptList>
  </DescriptorRecord>
  <DescriptorRecord>
    <DescriptorUI>D000002</DescriptorUI>
    <DescriptorName><String>Temefos</String></DescriptorName>
  </DescriptorRecord>
</DescriptorRecordSet>"#;

fn records() -> Vec<DescriptorRecord> {
    parse(XML.as_bytes()).collect::<Result<_, _>>().unwrap()
}

#[test]
fn test_one_line_per_record() {
    let records = records();
    let mut writer = NdjsonWriter::new(Vec::new());
    writer.write_records(&records).unwrap();
    let (buf, stats) = writer.finish().unwrap();

    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.bytes_written, buf.len() as u64);

    let text = String::from_utf8(buf).unwrap();
    assert!(text.ends_with('\n'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);

    // Embedded newlines in the scope note are escaped, not emitted raw
    let first: DescriptorRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first, records[0]);
    let second: DescriptorRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.descriptor_ui, "D000002");
}

#[test]
fn test_gzip_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("desc.ndjson.gz");

    let config = WriterConfig::for_path(&path);
    assert!(matches!(config.compression, CompressionType::Gzip(_)));

    let mut writer = NdjsonWriter::new_file(&path, &config).unwrap();
    writer.write_records(&records()).unwrap();
    let stats = writer.close().unwrap();
    assert_eq!(stats.records_written, 2);

    let mut decoder = flate2::read::GzDecoder::new(std::fs::File::open(&path).unwrap());
    let mut text = String::new();
    decoder.read_to_string(&mut text).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_plain_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("desc.ndjson");

    let config = WriterConfig::for_path(&path);
    assert_eq!(config.compression, CompressionType::Uncompressed);

    let mut writer = NdjsonWriter::new_file(&path, &config).unwrap();
    writer.write_records(&records()).unwrap();
    writer.close().unwrap();

    let reader = BufReader::new(std::fs::File::open(&path).unwrap());
    let uis: Vec<String> = reader
        .lines()
        .map(|l| serde_json::from_str::<DescriptorRecord>(&l.unwrap()).unwrap().descriptor_ui)
        .collect();
    assert_eq!(uis, vec!["D000001", "D000002"]);
}
