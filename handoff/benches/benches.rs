use criterion::{criterion_group, criterion_main, Criterion};

fn count_to_1000_handoff(b: &mut Criterion) {
    b.bench_function("count_to_1000_handoff", |b| {
        b.iter(|| {
            let relay = handoff::spawn(|port: handoff::Port<u32, u32>| {
                while let Ok(task) = port.recv() {
                    if port.send(task + 1).is_err() {
                        break;
                    }
                }
            })
            .unwrap();

            let mut total = 0u32;

            for n in 0..1000u32 {
                relay.send(n).unwrap();
                total += relay.recv().unwrap();
            }

            relay.join().unwrap();
            assert_eq!(total, 500500);
            total
        });
    });
}

fn count_to_1000_mpsc(b: &mut Criterion) {
    use std::sync::mpsc;
    use std::thread;

    b.bench_function("count_to_1000_mpsc", |b| {
        b.iter(|| {
            let mut total = 0u32;

            let t = {
                let (tx, rx) = mpsc::sync_channel(0);
                let (out_tx, out_rx) = mpsc::sync_channel(0);

                let t = thread::spawn(move || {
                    while let Ok(task) = rx.recv() {
                        out_tx.send(task + 1).unwrap();
                    }
                });

                for n in 0..1000u32 {
                    tx.send(n).unwrap();
                    total += out_rx.recv().unwrap();
                }

                t
            };

            t.join().unwrap();
            assert_eq!(total, 500500);
            total
        });
    });
}

fn stream_1000_handoff(b: &mut Criterion) {
    b.bench_function("stream_1000_handoff", |b| {
        b.iter(|| {
            let relay = handoff::spawn(|port: handoff::Port<u32, ()>| {
                for n in 0..1000u32 {
                    if port.send(n).is_err() {
                        break;
                    }
                }
            })
            .unwrap();

            let mut total = 0u32;

            while let Ok(n) = relay.recv() {
                total += n;
            }

            relay.join().unwrap();
            total
        });
    });
}

criterion_group!(
    benches,
    count_to_1000_handoff,
    count_to_1000_mpsc,
    stream_1000_handoff
);
criterion_main!(benches);
