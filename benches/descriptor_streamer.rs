use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meshparse::mesh::DescriptorStreamer;

fn generate_test_descriptors(num_records: usize, concepts_per_record: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<DescriptorRecordSet LanguageCode="eng">"#,
    );

    for i in 0..num_records {
        xml.push_str(&format!(
            r#"
  <DescriptorRecord DescriptorClass="1">
    <DescriptorUI>D{i:06}</DescriptorUI>
    <DescriptorName><String>Descriptor {i}</String></DescriptorName>
    <DateCreated><Year>1999</Year><Month>01</Month><Day>01</Day></DateCreated>
    <DateRevised><Year>2019</Year><Month>06</Month><Day>12</Day></DateRevised>
    <AllowableQualifiersList>
      <AllowableQualifier>
        <QualifierReferredTo><QualifierUI>Q000008</QualifierUI><QualifierName><String>administration &amp; dosage</String></QualifierName></QualifierReferredTo>
        <Abbreviation>AD</Abbreviation>
      </AllowableQualifier>
    </AllowableQualifiersList>
    <TreeNumberList><TreeNumber>D03.633.100.{i}</TreeNumber><TreeNumber>D02.540.{i}</TreeNumber></TreeNumberList>
    <ConceptList>"#
        ));
        for c in 0..concepts_per_record {
            let preferred = if c == 0 { "Y" } else { "N" };
            xml.push_str(&format!(
                r#"
      <Concept PreferredConceptYN="{preferred}">
        <ConceptUI>M{i:06}{c}</ConceptUI>
        <ConceptName><String>Concept {i}.{c}</String></ConceptName>
        <ScopeNote>An ionophorous, polyether antibiotic from Streptomyces chartreusensis.</ScopeNote>
        <TermList>
          <Term ConceptPreferredTermYN="Y" IsPermutedTermYN="N" LexicalTag="NON" RecordPreferredTermYN="{preferred}">
            <TermUI>T{i:06}{c}</TermUI><String>Concept {i}.{c}</String>
            <ThesaurusIDlist><ThesaurusID>NLM (1975)</ThesaurusID></ThesaurusIDlist>
          </Term>
        </TermList>
      </Concept>"#
            ));
        }
        xml.push_str("\n    </ConceptList>\n  </DescriptorRecord>");
    }

    xml.push_str("\n</DescriptorRecordSet>\n");
    xml.into_bytes()
}

fn bench_streamer(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptor_streamer");

    for &num_records in &[100usize, 1_000, 10_000] {
        let data = generate_test_descriptors(num_records, 3);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_records), &data, |b, data| {
            b.iter(|| {
                let mut streamer = DescriptorStreamer::new(Cursor::new(data.as_slice()));
                let mut count = 0usize;
                while let Some(record) = streamer.next_record().unwrap() {
                    count += record.concepts.len();
                    black_box(&record);
                }
                black_box(count)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_streamer);
criterion_main!(benches);
