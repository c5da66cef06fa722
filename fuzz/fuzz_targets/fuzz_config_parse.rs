#![no_main]

use std::time::Duration;

use folio_runtime::{FolioConfig, TransitionOrchestrator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // Parsing must never panic, whatever the format.
    let parsed = [FolioConfig::from_toml_str(text), FolioConfig::from_json_str(text)];

    for config in parsed.into_iter().flatten() {
        // Anything that validates must build and run.
        let Ok(mut orchestrator) = TransitionOrchestrator::new(&config) else {
            continue;
        };
        if config.stairs.panels > 256 {
            continue;
        }
        orchestrator.observe(&"/".into());
        orchestrator.tick(Duration::from_millis(16));
        orchestrator.observe(&"/fuzz".into());
        let frame = orchestrator.frame();
        for layer in frame.layers() {
            assert!(layer.opacity.is_finite());
            assert!(layer.panels.iter().all(|p| p.top_percent.is_finite()));
        }
    }
});
