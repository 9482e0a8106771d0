use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::accounts::domain::{LoginInput, RegisterInput};
use service::accounts::repository::mock::MockAccountRepository;
use service::accounts::AccountService;
use service::password;

fn bench_login(c: &mut Criterion) {
    let svc = AccountService::new(Arc::new(MockAccountRepository::default()));

    // register once outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(svc.register(RegisterInput {
        email: "bench@example.com".into(),
        name: "Bench".into(),
        password: "Benchmark1".into(),
    }))
    .unwrap();

    c.bench_function("account_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap();
        });
    });
}

fn bench_hash(c: &mut Criterion) {
    c.bench_function("argon2_hash_password", |b| {
        b.iter(|| password::hash_password("Benchmark1").unwrap());
    });
}

criterion_group!(benches, bench_login, bench_hash);
criterion_main!(benches);
