#![no_main]
use libfuzzer_sys::fuzz_target;
use moim_libs::{compute_default_availability, recommend, MemberSnapshot};

fuzz_target!(|members: Vec<MemberSnapshot>| {
    #[cfg(feature = "log")]
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let availability = compute_default_availability(&members);

    assert_eq!(availability.total_members, members.len());
    assert_eq!(availability.availability.len(), 7);

    for (day, slots) in availability.availability.iter().enumerate() {
        assert_eq!(usize::from(slots.day_of_week), day);
        for slot in &slots.slots {
            assert_eq!(
                slot.available_count,
                slot.available_members.len(),
                "Count out of sync at day {} {}",
                day,
                slot.start_time
            );
            assert!(slot.available_count <= members.len());
        }
    }

    assert_eq!(
        availability,
        compute_default_availability(&members),
        "Same input should produce the same output"
    );

    let recommendations = recommend(&availability);
    assert!(recommendations.len() <= 3);
    assert!(
        recommendations
            .windows(2)
            .all(|pair| pair[0].duration_minutes >= pair[1].duration_minutes),
        "Recommendations are not sorted by duration: {:?}",
        recommendations
    );
    for r in &recommendations {
        assert!(r.duration_minutes >= 60);
        assert_eq!(
            u32::from(r.end_time.minutes() - r.start_time.minutes()),
            r.duration_minutes
        );
    }
});
