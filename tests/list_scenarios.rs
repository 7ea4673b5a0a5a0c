use bibli::compare::natural;
use bibli::{InvalidOperation, List, ListError, Mode};
use itertools::assert_equal;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn assert_consistent<T>(list: &List<T>) {
    assert!(list.check_links());
    assert_eq!(list.iter().count(), list.size());
    assert_eq!(list.iter().rev().count(), list.size());
}

#[test]
fn push_find_remove_destroy() {
    init_logging();
    let mut list = List::with_comparator(Mode::Arrival, natural::<i32>);
    list.push_back(10).unwrap();
    list.push_back(20).unwrap();
    list.push_front(30).unwrap();
    assert_equal(&list, &[30, 10, 20]);

    let found = list.find(&20).unwrap().unwrap();
    let mut freed = Vec::new();
    list.remove_with(found, |value| freed.push(value)).unwrap();
    assert_eq!(freed, [20]);
    assert_equal(&list, &[30, 10]);
    assert_eq!(list.size(), 2);
    assert_consistent(&list);

    list.destroy_with(|value| freed.push(value));
    assert_eq!(freed, [20, 30, 10]);
}

#[test]
fn priority_insertion_is_stable() {
    init_logging();
    let mut list = List::priority();
    for (key, name) in [(5, "five"), (1, "first one"), (3, "three"), (1, "second one")] {
        list.insert_by_priority(name, key).unwrap();
    }
    assert_equal(
        list.iter().copied(),
        ["first one", "second one", "three", "five"],
    );
    assert_consistent(&list);
}

#[test]
fn mixed_pushes_keep_arrival_order() {
    let mut list = List::arrival();
    list.push_back('A').unwrap();
    list.push_front('B').unwrap();
    list.push_back('C').unwrap();
    assert_equal(list.iter().copied(), ['B', 'A', 'C']);
    assert_equal(list.iter().rev().copied(), ['C', 'A', 'B']);
}

#[test]
fn find_miss_leaves_list_untouched() {
    let mut list = List::with_comparator(Mode::Arrival, natural::<u32>);
    list.extend([1, 2, 3]);
    assert_eq!(list.find(&4), Ok(None));
    assert_eq!(list.size(), 3);
    assert_consistent(&list);
}

#[test]
fn find_without_comparator() {
    let mut list = List::<u32>::arrival();
    list.push_back(1).unwrap();
    assert_eq!(
        list.find(&1),
        Err(ListError::InvalidOperation(InvalidOperation::MissingComparator))
    );
    assert!(list.find_by(|value| *value == 1).is_some());
}

#[test]
fn removing_the_only_node_empties_the_list() {
    let mut list = List::arrival();
    let handle = list.push_back("only").unwrap();
    assert_eq!(list.remove(handle), Ok("only"));
    assert!(list.is_empty());
    assert!(list.front().is_none());
    assert!(list.back().is_none());
    assert_consistent(&list);

    // the handle is dead now
    assert_eq!(
        list.remove(handle),
        Err(ListError::InvalidOperation(InvalidOperation::StaleHandle))
    );
}

#[test]
fn handles_from_another_list_are_rejected() {
    let mut a = List::arrival();
    let mut b = List::arrival();
    let in_a = a.push_back(1).unwrap();
    b.push_back(1).unwrap();
    assert_eq!(
        b.remove(in_a),
        Err(ListError::InvalidOperation(InvalidOperation::ForeignHandle))
    );
    assert_eq!(b.size(), 1);
    assert_eq!(a.size(), 1);
}

#[test]
fn remove_while_walking_handles() {
    let mut list = List::<u32>::arrival();
    list.extend(1..=10);
    let odd = list
        .handles()
        .filter(|handle| list.get(*handle).is_some_and(|value| value % 2 == 1))
        .collect::<Vec<_>>();
    for handle in odd {
        list.remove(handle).unwrap();
    }
    assert_equal(list.iter().copied(), [2, 4, 6, 8, 10]);
    assert_consistent(&list);
}

#[test]
fn slots_are_reused_after_removal() {
    let mut list = List::<u32>::arrival();
    let handles = (0..8)
        .map(|value| list.push_back(value).unwrap())
        .collect::<Vec<_>>();
    for handle in handles {
        list.remove(handle).unwrap();
    }
    let capacity = list.capacity();
    list.extend(0..8);
    assert_eq!(list.capacity(), capacity);
    assert_consistent(&list);
}

// xorshift64, so every run replays the same sequences
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

#[test]
fn random_pushes_and_removals_keep_links() {
    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);
    for _ in 0..200 {
        let mut list = List::arrival();
        let mut model = std::collections::VecDeque::new();
        let mut live = Vec::new();
        for step in 0..60u32 {
            match rng.below(3) {
                0 => {
                    live.push(list.push_back(step).unwrap());
                    model.push_back(step);
                }
                1 => {
                    live.push(list.push_front(step).unwrap());
                    model.push_front(step);
                }
                _ if !live.is_empty() => {
                    let handle = live.swap_remove(rng.below(live.len()));
                    let value = list.remove(handle).unwrap();
                    model.retain(|kept| *kept != value);
                }
                _ => {}
            }
            assert_consistent(&list);
            assert_eq!(list.size(), live.len());
        }
        assert_equal(&list, &model);
    }
}

#[test]
fn random_priority_insertions_stay_sorted_and_stable() {
    let mut rng = Rng(0x2545_f491_4f6c_dd1d);
    for _ in 0..200 {
        let mut list = List::priority();
        let mut live = Vec::new();
        for arrival in 0..60u32 {
            if rng.below(4) == 0 && !live.is_empty() {
                let handle = live.swap_remove(rng.below(live.len()));
                list.remove(handle).unwrap();
            } else {
                let key = rng.below(5) as i64;
                live.push(list.insert_by_priority((key, arrival), key).unwrap());
            }
            assert_consistent(&list);
            assert_eq!(list.size(), live.len());
        }
        // ties keep arrival order, so (key, arrival) pairs are strictly increasing
        for (before, after) in list.iter().zip(list.iter().skip(1)) {
            assert!(before < after, "{before:?} before {after:?}");
        }
    }
}
