//! Named configurations shared by the integration tests.

use musicgen_spec::{Configuration, Key, Scale};

/// A configuration with a descriptive name for failure messages.
#[derive(Debug, Clone)]
pub struct ConfigFixture {
    pub name: &'static str,
    pub config: Configuration,
}

/// Configurations covering each scale, tempo extremes, and rest extremes.
pub fn reference_configs() -> Vec<ConfigFixture> {
    let mut fixtures = vec![
        ConfigFixture {
            name: "defaults",
            config: Configuration::default(),
        },
        ConfigFixture {
            name: "c_major_one_bar",
            config: Configuration::builder()
                .octave_range(4, 4)
                .num_bars(1)
                .rest_probability(0.0)
                .velocity_variation(false)
                .note_duration_variety("low")
                .build(),
        },
        ConfigFixture {
            name: "slow_waltz",
            config: Configuration::builder()
                .key(Key::BFlat)
                .tempo(40)
                .time_signature(3, 4)
                .rhythm_pattern("waltz")
                .build(),
        },
        ConfigFixture {
            name: "fast_compound",
            config: Configuration::builder()
                .key(Key::FSharp)
                .tempo(240)
                .time_signature(6, 8)
                .note_duration_variety("high")
                .rhythm_pattern("mixed")
                .num_bars(16)
                .build(),
        },
        ConfigFixture {
            name: "sparse",
            config: Configuration::builder().rest_probability(0.9).build(),
        },
    ];

    for scale in Scale::ALL {
        fixtures.push(ConfigFixture {
            name: scale.as_str(),
            config: Configuration::builder().scale(scale).num_bars(4).build(),
        });
    }

    fixtures
}
