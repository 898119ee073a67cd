use criterion::{black_box, criterion_group, criterion_main, Criterion};
use moim_libs::grid::full_day_slots;
use moim_libs::{
    compute_availability, compute_default_availability, recommend, BlockedInterval, MemberSnapshot,
};

fn test_members(count: usize) -> Vec<MemberSnapshot> {
    (0..count)
        .map(|i| {
            let intervals = (0..7u8)
                .flat_map(|day| {
                    let offset = ((i + usize::from(day)) % 6) as u8;
                    vec![
                        BlockedInterval::parse(day, &format!("{:02}:00", 9 + offset), &format!("{:02}:30", 10 + offset)),
                        BlockedInterval::parse(day, &format!("{:02}:00", 17 + offset), "23:00"),
                    ]
                })
                .collect::<Result<Vec<_>, _>>()
                .unwrap();

            MemberSnapshot::new(&i.to_string(), &format!("member-{}", i), intervals)
        })
        .collect()
}

fn aggregate_and_recommend(c: &mut Criterion) {
    c.bench_function("compute_default_availability", |b| {
        let members = test_members(30);

        b.iter(|| black_box(compute_default_availability(&members)));
    });

    c.bench_function("compute_full_day_availability", |b| {
        let members = test_members(30);
        let slots = full_day_slots();

        b.iter(|| black_box(compute_availability(&members, &slots)));
    });

    c.bench_function("recommend", move |b| {
        let availability = compute_default_availability(&test_members(30));

        b.iter(|| black_box(recommend(&availability)));
    });
}

criterion_group!(benches, aggregate_and_recommend);
criterion_main!(benches);
