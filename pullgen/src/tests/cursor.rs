use crate::{CursorGenerator, Error, Generator};
use rand::Rng;

#[test]
fn test_cursor_inclusive() -> anyhow::Result<()> {
    let mut g = CursorGenerator::new(1, 3, |n: &u32| n + 1);

    assert_eq!(g.next()?, 1);
    assert_eq!(g.next()?, 2);
    assert_eq!(g.current()?, 3);
    assert!(!g.is_end()?);
    assert_eq!(g.next()?, 3);
    assert!(g.is_end()?);
    assert!(g.is_end()?);
    assert!(matches!(g.current(), Err(Error::EndOfSequence)));
    assert!(matches!(g.next(), Err(Error::EndOfSequence)));
    assert_eq!(g.index(), 3);
    Ok(())
}

#[test]
fn test_cursor_single_value() -> anyhow::Result<()> {
    let mut g = CursorGenerator::new("x", "x", |_: &&str| "never");
    let values = g.iter().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(values, ["x"]);
    Ok(())
}

#[test]
fn test_cursor_exclusive() -> anyhow::Result<()> {
    let mut g = CursorGenerator::exclusive(1, 4, |n: &u32| n + 1);
    assert!(g.is_exclusive());

    let values = g.iter().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(values, [1, 2, 3]);

    let mut g = CursorGenerator::exclusive(4, 4, |n: &u32| n + 1);
    assert!(g.is_end()?);
    assert!(g.next().unwrap_err().is_end_of_sequence());
    Ok(())
}

#[test]
fn test_cursor_successions() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    for _ in 0..16 {
        let start = rng.gen_range(0..1000u64);
        let end = start + rng.gen_range(0..64);

        let mut g = CursorGenerator::new(start, end, |n: &u64| n + 1);
        let values = g.iter().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(values, (start..=end).collect::<Vec<_>>());
        assert_eq!(g.index(), values.len());
    }

    Ok(())
}

#[test]
fn test_cursor_rewind() -> anyhow::Result<()> {
    let mut g = CursorGenerator::new(1, 64, |n: &u32| n * 2);

    let first = g.iter().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(first, [1, 2, 4, 8, 16, 32, 64]);

    g.rewind();
    assert_eq!(g.index(), 0);
    assert_eq!(g.current()?, 1);

    let second = g.iter().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_cursor_each_is_a_fresh_pass() -> anyhow::Result<()> {
    let mut g = CursorGenerator::new('a', 'd', |c: &char| (*c as u8 + 1) as char);
    assert_eq!(g.next()?, 'a');
    assert_eq!(g.next()?, 'b');

    let mut seen = String::new();
    g.each(&mut |c| seen.push(c))?;

    assert_eq!(seen, "abcd");
    assert_eq!(g.index(), 2);
    assert_eq!(g.next()?, 'c');
    Ok(())
}

#[test]
fn test_cursor_accessors() {
    let g = CursorGenerator::new(3, 7, |n: &i32| n + 2);
    assert_eq!(*g.start(), 3);
    assert_eq!(*g.end(), 7);
    assert!(!g.is_exclusive());
}
