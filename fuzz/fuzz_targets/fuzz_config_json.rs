//! Feeds arbitrary bytes through configuration parsing and, when a
//! configuration is accepted, through generation and MIDI encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use musicgen_backend_midi::render_midi;
use musicgen_spec::Configuration;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = Configuration::from_json(text) else {
        return;
    };

    // Bound the work per input.
    if config.num_bars > 64 || config.tempo < 20 || config.time_signature_num > 32 {
        return;
    }

    if let Ok(render) = render_midi(&config, 0) {
        assert_eq!(&render.data[0..4], b"MThd");
        assert_eq!(
            Configuration::from_map(&config.to_map()).ok().as_ref(),
            Some(&config)
        );
    }
});
