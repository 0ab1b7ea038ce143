//! Criterion benchmarks for Taxonomer.
//!
//! - Pattern matching of the built-in hyponym rules over a synthetic corpus
//! - Consolidation and ranking of extracted candidates

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use taxonomer::corpus::{Corpus, CorpusClient, Document, Sentence};
use taxonomer::embedding::WordVectors;
use taxonomer::query::{PatternCompiler, RelationKind};
use taxonomer::taxonomy::{ConsolidatedMatch, SimilarityScorer};

const NOUNS: [&str; 8] = [
    "dog", "cat", "animal", "poodle", "terrier", "pet", "mammal", "beagle",
];
const ADJECTIVES: [&str; 4] = ["small", "big", "old", "friendly"];

/// Generate documents mixing relation sentences with filler.
fn generate_corpus(documents: usize) -> Corpus {
    let docs = (0..documents)
        .map(|i| {
            let noun = NOUNS[i % NOUNS.len()];
            let other = NOUNS[(i * 3 + 1) % NOUNS.len()];
            let adjective = ADJECTIVES[i % ADJECTIVES.len()];
            let sentences = vec![
                Sentence::from_tagged(&format!(
                    "{noun}s/{noun}/NOUN such/such/ADJ as/as/ADP {adjective}/{adjective}/ADJ {other}s/{other}/NOUN"
                )),
                Sentence::from_tagged(&format!(
                    "the/the/DET {adjective}/{adjective}/ADJ {noun}/{noun}/NOUN sleeps/sleep/VERB all/all/DET day/day/NOUN"
                )),
                Sentence::from_tagged(&format!(
                    "{other}s/{other}/NOUN and/and/CCONJ other/other/ADJ {noun}s/{noun}/NOUN"
                )),
            ];
            Document::new(i as u64, sentences)
        })
        .collect();
    Corpus::from_documents(docs)
}

fn bench_pattern_matching(c: &mut Criterion) {
    let corpus = generate_corpus(2_000);
    let compiler = PatternCompiler::default();
    let queries = compiler
        .compile(&["dog".to_string()], RelationKind::Hyponym, true)
        .unwrap();

    let mut group = c.benchmark_group("pattern_matching");
    group.throughput(Throughput::Elements(corpus.sentence_count() as u64));
    group.bench_function("hyponym_rules", |b| {
        b.iter(|| {
            let mut hits = 0;
            for query in &queries {
                hits += corpus.execute(black_box(query)).unwrap().len();
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let pairs: Vec<(String, Vec<f32>)> = (0..1_000)
        .map(|i| {
            let data = (0..100).map(|d| ((i * 31 + d * 7) % 97) as f32 / 97.0).collect();
            (format!("word{i}"), data)
        })
        .collect();
    let scorer = SimilarityScorer::new(Arc::new(WordVectors::from_pairs(pairs).unwrap()));

    let candidates: Vec<ConsolidatedMatch> = (0..1_000)
        .map(|i| {
            ConsolidatedMatch::counted(vec![format!("word{i}"), format!("word{}", (i + 1) % 1_000)], i % 17 + 1)
        })
        .collect();
    let query = vec!["word0".to_string()];

    let mut group = c.benchmark_group("ranking");
    group.throughput(Throughput::Elements(candidates.len() as u64));
    group.bench_function("rank_1000_candidates", |b| {
        b.iter(|| black_box(scorer.rank(black_box(&query), black_box(&candidates))))
    });
    group.finish();
}

criterion_group!(benches, bench_pattern_matching, bench_ranking);
criterion_main!(benches);
