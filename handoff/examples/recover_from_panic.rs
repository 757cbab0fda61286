fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    for _ in 0..100 {
        let relay = handoff::Builder::new()
            .name("panicky")
            .spawn(|port: handoff::Port<u32, ()>| {
                let _ = port.send(1);
                std::thread::sleep(std::time::Duration::from_millis(1));
                panic!("trigger");
            })?;

        assert_eq!(relay.recv()?, 1);
        assert!(relay.recv().is_err());
        assert!(relay.join().is_err());
    }

    Ok(())
}
