#![no_main]
use libfuzzer_sys::fuzz_target;
use moim_libs::grid::{index_of, next_slot_boundary, slot_end};
use moim_libs::TimeOfDay;

fuzz_target!(|data: (&str, TimeOfDay)| {
    let (input, time) = data;

    // Whatever parses must print back exactly as given
    if let Ok(parsed) = input.parse::<TimeOfDay>() {
        assert_eq!(parsed.to_string(), input);
    }

    let formatted = time.to_string();
    assert_eq!(formatted.parse::<TimeOfDay>(), Ok(time));

    match next_slot_boundary(time) {
        Ok(next) => {
            assert!(index_of(time).is_some());
            assert_eq!(next.minutes() - time.minutes(), 30);
            assert_eq!(slot_end(time), next);
        }
        Err(_) => assert!(!time.is_slot_aligned() || time == TimeOfDay::END_OF_DAY),
    }

    assert!(slot_end(time) >= time);
});
