//! A running total which is fed its increments by the consumer.

use pullgen::{Generator, ThreadedGenerator, Yielder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let mut totals = ThreadedGenerator::new(|y: &mut dyn Yielder<u64, u64>| {
        let mut total = 0;

        loop {
            total += y.yield_(total)?;
        }
    });

    for step in 1..=5 {
        let total = totals.next()?;
        println!("total: {}", total);
        totals.feed(step)?;
    }

    println!("index: {}", totals.index());
    totals.close();
    assert!(totals.is_end()?);
    Ok(())
}
