//! Drive generators of different shapes in lockstep.
//!
//! Run with `RUST_LOG=debug` to see workers come and go.

use pullgen::{AnyGenerator, Halt, SynchronizedZipper, Yielder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let names = ["alpha", "beta", "gamma", "delta"];

    let mut zipper = SynchronizedZipper::<AnyGenerator<'_, String>>::new(vec![
        AnyGenerator::indexed(&names, |s: &[&str; 4], i| s[i].to_string()),
        AnyGenerator::cursor(String::from("a"), String::from("aaa"), |s: &String| {
            format!("{}a", s)
        }),
        AnyGenerator::body(|y: &mut dyn Yielder<String>| {
            let mut a = 0u64;
            let mut b = 1u64;

            loop {
                if a > 1 {
                    return Err(Halt::Stop);
                }

                y.yield_(a.to_string())?;
                let next = a + b;
                a = b;
                b = next;
            }
        }),
    ]);

    zipper.each(|round| {
        let columns = round
            .into_iter()
            .map(|value| value.unwrap_or_else(|| String::from("-")))
            .collect::<Vec<_>>();

        println!("{}", columns.join("\t"));
    })?;

    Ok(())
}
