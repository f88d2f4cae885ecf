use crate::depth::Depth;

#[test]
fn test_depth_empty() {
    let depth = Depth::new();
    assert_eq!(depth.samples(), 0);
    assert_eq!(depth.mean(), 0);
    assert!(depth.percentiles().is_empty());
}

#[test]
fn test_depth_sample() {
    let mut depth = Depth::new();
    for d in [3, 4, 4, 4, 5, 5, 5, 5, 6, 9].iter().cloned() {
        depth.sample(d);
    }
    assert_eq!(depth.samples(), 10);
    assert_eq!(depth.min(), 3);
    assert_eq!(depth.max(), 9);
    assert_eq!(depth.mean(), 50 / 10);
    assert_eq!(depth.percentiles(), vec![(90, 6), (100, 9)]);
}

#[test]
fn test_depth_zero() {
    let mut depth = Depth::new();
    depth.sample(0);
    depth.sample(2);
    assert_eq!(depth.min(), 0);
    assert_eq!(depth.max(), 2);
    assert_eq!(depth.percentiles(), vec![(100, 2)]);
}
