use crate::llrb::Llrb;
use crate::pool::Pool;

#[test]
fn test_acquire_release() {
    let mut pool: Pool<i64, &str> = Pool::with_capacity(0);

    let a = pool.acquire(1, "one");
    let b = pool.acquire(2, "two");
    assert_ne!(a, b);
    assert_eq!(pool.live(), 2);
    assert_eq!(pool.free(), 0);
    assert_eq!(pool.reused(), 0);

    assert_eq!(pool.release(a), (1, "one"));
    assert_eq!(pool.live(), 1);
    assert_eq!(pool.free(), 1);

    let c = pool.acquire(3, "three");
    assert_eq!(c, a);
    assert_eq!(pool.free(), 0);
    assert_eq!(pool.reused(), 1);
    assert_eq!(pool[c].key, 3);
    assert_eq!(pool[c].value, "three");
}

#[test]
fn test_reuse_is_clean() {
    let mut pool: Pool<i64, i64> = Pool::with_capacity(4);

    let a = pool.acquire(10, 100);
    let b = pool.acquire(20, 200);
    let c = pool.acquire(30, 300);
    pool[b].left = Some(a);
    pool[b].right = Some(c);
    pool[b].set_black();

    pool.release(b);
    let d = pool.acquire(40, 400);
    assert_eq!(d, b);

    let node = &pool[d];
    assert_eq!(node.left, None);
    assert_eq!(node.right, None);
    assert!(!node.is_black());
    assert_eq!((node.key, node.value), (40, 400));
}

#[test]
fn test_clear() {
    let mut pool: Pool<i64, i64> = Pool::with_capacity(0);
    let ids: Vec<usize> = (0..10).map(|i| pool.acquire(i, i)).collect();
    pool.release(ids[3]);
    pool.release(ids[7]);
    let capacity = pool.capacity();

    pool.clear();
    assert_eq!(pool.live(), 0);
    assert_eq!(pool.free(), 0);
    assert_eq!(pool.capacity(), capacity);
}

#[test]
fn test_tree_reuses_slots() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-pool");
    for key in 0..1000 {
        llrb.set(key, key);
    }
    let capacity = llrb.stats().pool_capacity();

    for key in (0..1000).filter(|k| k % 2 == 0) {
        llrb.delete(&key);
    }
    let stats = llrb.stats();
    assert_eq!(stats.entries(), 500);
    assert_eq!(stats.pool_free(), 500);

    // refill with fresh keys, no growth and every insert recycles.
    for key in 1000..1500 {
        llrb.set(key, key);
    }
    let stats = llrb.validate().unwrap();
    assert_eq!(stats.entries(), 1000);
    assert_eq!(stats.pool_free(), 0);
    assert_eq!(stats.pool_reused(), 500);
    assert_eq!(stats.pool_capacity(), capacity);

    // overwrites never touch the pool.
    for key in 1000..1500 {
        assert_eq!(llrb.set(key, -key), Some(key));
    }
    assert_eq!(llrb.stats().pool_reused(), 500);
    for key in (0..1500).filter(|k| *k >= 1000 || k % 2 == 1) {
        let want = if key >= 1000 { -key } else { key };
        assert_eq!(llrb.get(&key), Ok(&want));
    }
}

#[test]
fn test_delete_min_max_release() {
    let mut llrb: Llrb<i64, i64> = Llrb::new("test-pool");
    for key in 0..100 {
        llrb.set(key, key);
    }
    assert_eq!(llrb.delete_min(), Some((0, 0)));
    assert_eq!(llrb.delete_max(), Some((99, 99)));
    assert_eq!(llrb.stats().pool_free(), 2);

    llrb.set(500, 500);
    llrb.set(-500, -500);
    let stats = llrb.validate().unwrap();
    assert_eq!(stats.pool_free(), 0);
    assert_eq!(stats.pool_reused(), 2);
}
