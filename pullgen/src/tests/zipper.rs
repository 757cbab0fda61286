use crate::{
    CursorGenerator, Error, Generator, Halt, IndexedGenerator, SynchronizedZipper,
    ThreadedGenerator, Yielder,
};
use std::convert::Infallible;

fn succ(n: &u32) -> u32 {
    n + 1
}

#[test]
fn test_zipper_rounds() -> anyhow::Result<()> {
    let a = [1, 2, 3];
    let b = [10, 20, 30, 40, 50];
    let c = [100, 200];

    let mut zipper = SynchronizedZipper::new(vec![
        IndexedGenerator::elements(&a[..]),
        IndexedGenerator::elements(&b[..]),
        IndexedGenerator::elements(&c[..]),
    ]);

    assert_eq!(zipper.len(), 3);

    let mut rounds = Vec::new();
    let mut ended = Vec::new();

    loop {
        ended.push(zipper.is_end(None)?);

        match zipper.next_round()? {
            Some(round) => rounds.push(round),
            None => break,
        }
    }

    assert_eq!(
        rounds,
        [
            vec![Some(1), Some(10), Some(100)],
            vec![Some(2), Some(20), Some(200)],
            vec![Some(3), Some(30), None],
            vec![None, Some(40), None],
            vec![None, Some(50), None],
        ]
    );

    assert_eq!(ended, [false, false, true, true, true, true]);
    Ok(())
}

#[test]
fn test_zipper_each_rewinds() -> anyhow::Result<()> {
    let a = [1, 2];
    let b = [3];

    let mut zipper = SynchronizedZipper::new(vec![
        IndexedGenerator::elements(&a[..]),
        IndexedGenerator::elements(&b[..]),
    ]);

    assert!(zipper.next_round()?.is_some());
    assert!(zipper.next_round()?.is_some());
    assert!(zipper.next_round()?.is_none());

    let mut rounds = Vec::new();
    zipper.each(|round| rounds.push(round))?;
    assert_eq!(rounds, [vec![Some(1), Some(3)], vec![Some(2), None]]);

    rounds.clear();
    zipper.each(|round| rounds.push(round))?;
    assert_eq!(rounds.len(), 2);
    Ok(())
}

#[test]
fn test_zipper_is_end_by_index() -> anyhow::Result<()> {
    let mut zipper = SynchronizedZipper::new(vec![
        CursorGenerator::new(1, 2, succ),
        CursorGenerator::new(1, 1, succ),
    ]);

    zipper.next_round()?;

    assert!(!zipper.is_end(Some(0))?);
    assert!(zipper.is_end(Some(1))?);
    assert!(zipper.is_end(None)?);
    assert!(matches!(zipper.is_end(Some(2)), Err(Error::Misuse(..))));
    Ok(())
}

#[test]
fn test_zipper_mixed_strategies() -> anyhow::Result<()> {
    super::tracing();

    let data = vec![7, 8, 9];

    let generators: Vec<Box<dyn Generator<Item = u32, Error = Infallible> + '_>> = vec![
        Box::new(IndexedGenerator::new(&data, |s: &Vec<u32>, i| s[i])),
        Box::new(CursorGenerator::exclusive(0, 2, |n: &u32| n + 1)),
        Box::new(ThreadedGenerator::new(|y: &mut dyn Yielder<u32>| {
            y.yield_(42)?;
            Ok(())
        })),
    ];

    let mut zipper = generators.into_iter().collect::<SynchronizedZipper<_>>();

    let mut rounds = Vec::new();
    zipper.each(|round| rounds.push(round))?;

    assert_eq!(
        rounds,
        [
            vec![Some(7), Some(0), Some(42)],
            vec![Some(8), Some(1), None],
            vec![Some(9), None, None],
        ]
    );

    Ok(())
}

#[test]
fn test_zipper_surfaces_errors() {
    let mut zipper = SynchronizedZipper::new(vec![ThreadedGenerator::new(
        |y: &mut dyn Yielder<u32, (), &'static str>| {
            y.yield_(1)?;
            Err(Halt::Error("broken"))
        },
    )]);

    assert!(matches!(zipper.next_round(), Ok(Some(..))));
    assert!(matches!(zipper.next_round(), Err(Error::Producer("broken"))));
    assert!(matches!(zipper.next_round(), Ok(None)));
}

#[test]
fn test_zipper_empty() -> anyhow::Result<()> {
    let mut zipper = SynchronizedZipper::<CursorGenerator<u32, fn(&u32) -> u32>>::new(vec![]);

    assert!(zipper.is_empty());
    assert!(!zipper.is_end(None)?);
    assert!(zipper.next_round()?.is_none());
    Ok(())
}

#[test]
fn test_zipper_access() -> anyhow::Result<()> {
    let mut zipper = SynchronizedZipper::new(vec![
        CursorGenerator::new(1, 3, succ),
        CursorGenerator::new(4, 6, succ),
    ]);

    if let Some(g) = zipper.get_mut(1) {
        assert_eq!(g.next()?, 4);
    }

    assert_eq!(zipper.get(1).map(|g| g.index()), Some(1));
    assert!(zipper.get(2).is_none());
    assert_eq!(zipper.next_round()?, Some(vec![Some(1), Some(5)]));

    let generators = zipper.into_inner();
    assert_eq!(generators.len(), 2);
    assert_eq!(generators[0].index(), 1);
    Ok(())
}
