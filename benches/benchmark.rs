// Fit and query benchmarks over a synthetic scheme corpus
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use schemerec_core::{
    AgeBracket, Domicile, Gender, QueryRanker, Scheme, SocialCategory, TfidfVectorizer,
    VectorSpaceConfig,
};

const WORDS: &[&str] = &[
    "education", "scholarship", "students", "healthcare", "subsidy", "elderly",
    "pension", "widow", "housing", "rural", "farmers", "crop", "insurance",
    "loan", "artisan", "fisheries", "girl", "child", "disability", "skill",
    "training", "employment", "tribal", "welfare", "grant", "hostel",
];

fn generate_corpus(size: usize) -> Vec<Scheme> {
    let mut rng = rand::rng();
    (0..size)
        .map(|i| {
            let description: Vec<&str> = (0..12)
                .map(|_| WORDS[rng.random_range(0..WORDS.len())])
                .collect();
            Scheme {
                name: format!("Scheme {}", i % (size / 2).max(1)),
                description: description.join(" "),
                age: AgeBracket::ALL[rng.random_range(0..AgeBracket::ALL.len())],
                social_category: SocialCategory::ALL[rng.random_range(0..3)],
                gender: Gender::ALL[rng.random_range(0..3)],
                domicile: Domicile::ALL[rng.random_range(0..2)],
                user_id: Some(i as u64),
            }
        })
        .collect()
}

fn benchmark_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");

    for size in [100, 1000, 10000].iter() {
        let corpus = generate_corpus(*size);
        group.bench_with_input(BenchmarkId::new("tfidf", size), &corpus, |b, corpus| {
            b.iter(|| {
                TfidfVectorizer::fit_schemes(black_box(corpus), &VectorSpaceConfig::default())
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for size in [1000, 10000].iter() {
        let corpus = generate_corpus(*size);
        let (vectorizer, matrix) =
            TfidfVectorizer::fit_schemes(&corpus, &VectorSpaceConfig::default()).unwrap();
        let ranker = QueryRanker::new(&corpus, &vectorizer, &matrix).unwrap();

        group.bench_with_input(BenchmarkId::new("query", size), size, |b, _| {
            b.iter(|| ranker.recommend(black_box("education scholarship 21-25 ST M Y"), 5));
        });
        group.bench_with_input(BenchmarkId::new("user", size), size, |b, _| {
            b.iter(|| ranker.similar_to_user(black_box(42), 5).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_fit, benchmark_recommend);
criterion_main!(benches);
