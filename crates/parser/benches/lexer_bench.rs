use criterion::{Criterion, criterion_group, criterion_main};
use solas_parser::lexer::Lexer;
use solas_parser::matcher::Matcher;
use std::hint::black_box;

const DEMO: &str = r#"
// Intent: Securely fetch data and grow a sequence
emit "Solas Engine v1.0 Active"

stream data from @net.api("https://jsonplaceholder.typicode.com/todos/1") {
    secure with @env.api_key
    retry(2)
    emit "Network Success: {data['title']}"
}

grow sequence to 5 {
    init [1, 1]
    step: tail(2).sum
}
emit sequence
"#;

fn bench_lexer_simple(c: &mut Criterion) {
    let source = "store \"X\" as k";
    c.bench_function("lexer_simple", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            let _ = black_box(lexer.tokenize());
        });
    });
}

fn bench_lexer_connectives(c: &mut Criterion) {
    let source = "refract if latency > 50 and mode is not \"slow\" and ready";
    c.bench_function("lexer_connectives", |b| {
        b.iter(|| {
            let lexer = Lexer::new(black_box(source));
            let _ = black_box(lexer.tokenize());
        });
    });
}

fn bench_match_demo(c: &mut Criterion) {
    c.bench_function("match_demo", |b| {
        b.iter(|| {
            let stream = Lexer::new(black_box(DEMO)).tokenize();
            if let Ok(stream) = stream {
                let _ = black_box(Matcher::new(stream).match_program());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_lexer_simple,
    bench_lexer_connectives,
    bench_match_demo
);
criterion_main!(benches);
