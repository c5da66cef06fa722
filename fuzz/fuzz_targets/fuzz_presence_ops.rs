#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use folio_core::animation::StaggerPlan;
use folio_core::route::RouteId;
use folio_runtime::{KeyedPresence, Observation, SequencingMode, StairWipe};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Observe(u8),
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    wait: bool,
    panels: u8,
    unit_ms: u16,
    duration_ms: u16,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let Ok(plan) = StaggerPlan::new(
        usize::from(input.panels % 16),
        Duration::from_millis(u64::from(input.unit_ms)),
        Duration::from_millis(u64::from(input.duration_ms)),
    ) else {
        return;
    };
    let mode = if input.wait {
        SequencingMode::Wait
    } else {
        SequencingMode::Concurrent
    };
    let mut presence = KeyedPresence::new("fuzz", mode, move |_| StairWipe::new(&plan, None));

    let mut changes = 0u64;
    for op in input.ops.iter().take(512) {
        match *op {
            Op::Observe(k) => {
                let key = RouteId::new(format!("/{}", k % 8));
                if presence.observe(&key) != Observation::Unchanged {
                    changes += 1;
                }
            }
            Op::Tick(ms) => presence.tick(Duration::from_millis(u64::from(ms))),
        }
        if mode == SequencingMode::Wait {
            assert!(presence.exiting().len() <= 1);
            assert!(presence.exiting().is_empty() || presence.current().is_none());
        }
    }
    assert!(presence.mount_count() <= changes);
});
