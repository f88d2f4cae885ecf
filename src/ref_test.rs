// Reference index, a dense vector addressed by key. Slots with a
// negative key are empty.
#[derive(Clone)]
struct RefNode {
    key: i64,
    value: i64,
}

struct RefNodes {
    entries: Vec<RefNode>,
}

impl RefNodes {
    fn new(capacity: usize) -> RefNodes {
        let entries = (0..capacity).map(|_| RefNode { key: -1, value: 0 }).collect();
        RefNodes { entries }
    }

    fn live(&self) -> impl DoubleEndedIterator<Item = &RefNode> {
        self.entries.iter().filter(|item| item.key >= 0)
    }

    fn len(&self) -> usize {
        self.live().count()
    }

    fn get(&self, key: i64) -> Option<i64> {
        let entry = &self.entries[key as usize];
        if entry.key < 0 {
            None
        } else {
            Some(entry.value)
        }
    }

    fn floor(&self, key: i64) -> Option<i64> {
        self.live().rev().find(|item| item.key <= key).map(|item| item.value)
    }

    fn ceil(&self, key: i64) -> Option<i64> {
        self.live().find(|item| item.key >= key).map(|item| item.value)
    }

    fn min(&self) -> Option<(i64, i64)> {
        self.live().next().map(|item| (item.key, item.value))
    }

    fn max(&self) -> Option<(i64, i64)> {
        self.live().next_back().map(|item| (item.key, item.value))
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        let entry = &mut self.entries[key as usize];
        let old_value = if entry.key < 0 {
            None
        } else {
            Some(entry.value)
        };
        entry.key = key;
        entry.value = value;
        old_value
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        let entry = &mut self.entries[key as usize];
        if entry.key < 0 {
            None
        } else {
            entry.key = -1;
            Some(entry.value)
        }
    }

    fn delete_min(&mut self) -> Option<(i64, i64)> {
        let (key, value) = self.min()?;
        self.delete(key);
        Some((key, value))
    }

    fn delete_max(&mut self) -> Option<(i64, i64)> {
        let (key, value) = self.max()?;
        self.delete(key);
        Some((key, value))
    }
}

// compare every key in the reference against the tree, both ways.
fn check_against(llrb: &Llrb<i64, i64>, refns: &RefNodes) {
    assert_eq!(llrb.len(), refns.len());
    for key in 0..(refns.entries.len() as i64) {
        assert_eq!(llrb.get(&key).ok().cloned(), refns.get(key), "key {}", key);
    }
    assert_eq!(
        llrb.min().ok().map(|(k, v)| (*k, *v)),
        refns.min()
    );
    assert_eq!(
        llrb.max().ok().map(|(k, v)| (*k, *v)),
        refns.max()
    );
}
