use criterion::{criterion_group, criterion_main, Criterion};
use marc21::Record;

const RECORD: &[u8] = b"00458nam a22001577u 4500001001200000005001700012008004100029035001600070245005400086260004100140300003500181650003100216710003300247988001300280906000700293\x1e000000002-7\x1e20120831093346.0\x1e821202|1937    |||||||  |||| |0||||eng|d\x1e0 \x1faocm83544809\x1e00\x1faGarden exhibition /\x1fcSan Francisco Museum of Art.\x1e0 \x1faSan Francisco :\x1fbThe Museum,\x1fc[1937]\x1e  \x1fa1 folded sheet (4p.) ;\x1fc14 cm.\x1e 0\x1faHorticultural exhibitions.\x1e2 \x1faSan Francisco Museum of Art.\x1e  \x1fa20020608\x1e  \x1f0MH\x1e\x1d";

pub fn decode_record_benchmark(c: &mut Criterion) {
    c.bench_function("decode_record", |b| {
        b.iter(|| {
            let record = Record::from_bytes(RECORD).unwrap();
            assert_eq!(record.field_tags().len(), 11);
        })
    });
}

pub fn extract_values_benchmark(c: &mut Criterion) {
    let record = Record::from_bytes(RECORD).unwrap();
    c.bench_function("extract_values", |b| {
        b.iter(|| {
            let field = record.data_field("260").unwrap();
            let publisher = field.nth_subfield("b", 0, 0).unwrap();
            assert!(!publisher.is_empty())
        })
    });
}

criterion_group!(benches, decode_record_benchmark, extract_values_benchmark);
criterion_main!(benches);
