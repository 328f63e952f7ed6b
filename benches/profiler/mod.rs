// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn knob<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion tuned by `CELLGRAPH_BENCH_*` knobs, sampling a flamegraph per benchmark when run
/// with `--profile-time`.
pub fn criterion() -> Criterion {
    let frequency = knob::<i32>("CELLGRAPH_BENCH_PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = knob::<usize>("CELLGRAPH_BENCH_SAMPLE_SIZE", 50).clamp(10, 200);
    let warmup = knob::<u64>("CELLGRAPH_BENCH_WARMUP_SECS", 2).clamp(1, 60);
    let measurement = knob::<u64>("CELLGRAPH_BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measurement))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
