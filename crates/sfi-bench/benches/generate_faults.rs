// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sfi_compose::{FaultSpec, FrameFault, FrameFaultConfig};
use sfi_faults::{FaultKind, FaultParams, ParamValue, StuckValueFault};
use sfi_inject::{IndexWindow, Injector};

const N: usize = 100_000;
const ROWS: usize = 1_000;

fn scalar(value: f64) -> ParamValue {
    ParamValue::Scalar(value)
}

fn benchmark_injector(c: &mut Criterion) {
    let values: Vec<f64> = (0..N)
        .map(|idx| {
            let x = idx as f64;
            x.sin() + x.cos() * 0.1
        })
        .collect();
    let fault = StuckValueFault::new(0.0).expect("benchmark fault should be valid");
    let mut injector = Injector::new(Box::new(fault), IndexWindow::new(0, N as isize));

    let mut group = c.benchmark_group("injector");
    group.bench_function("stuck_inject_n1e5", |b| {
        b.iter(|| {
            let out = injector
                .inject_fault(black_box(&values))
                .expect("inject should succeed");
            black_box(out);
        })
    });
    group.finish();
}

fn benchmark_frame_fault(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_fault");

    group.bench_function("vertical_drift_n1e5", |b| {
        let mut config = FrameFaultConfig::new(vec!["a", "b", "c"]);
        config.df_length = Some(N);
        let mut fault = FrameFault::new(config).expect("benchmark config should be valid");
        let mut params = FaultParams::new();
        params.insert("drift_rate".to_string(), scalar(0.01));
        fault
            .assign_fault(&["a", "b", "c"], FaultSpec::Kind(FaultKind::Drift), params)
            .expect("assign should succeed");

        b.iter(|| {
            let generation = fault.generate().expect("generate should succeed");
            black_box(generation.frame);
        })
    });

    group.bench_function("horizontal_noise_rows1e3_len100", |b| {
        let mut config = FrameFaultConfig::new(vec!["a"]);
        config.horizontal = true;
        config.df_length = Some(ROWS);
        config.fault_length = Some(100);
        let mut fault = FrameFault::new(config).expect("benchmark config should be valid");
        let mut params = FaultParams::new();
        params.insert("mu".to_string(), scalar(0.0));
        params.insert("sigma".to_string(), scalar(1.0));
        fault
            .assign_fault(&["a"], FaultSpec::Kind(FaultKind::NormalNoise), params)
            .expect("assign should succeed");

        b.iter(|| {
            let generation = fault.generate().expect("generate should succeed");
            black_box(generation.frame);
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_injector, benchmark_frame_fault);
criterion_main!(benches);
