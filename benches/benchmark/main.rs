use criterion::criterion_main;


criterion_main!(enrich::enrich_benches, normalize::normalize_benches);
