//! Property tests: balanced nesting, minimal reuse and the uniqueness
//! barrier over random path sequences.

use proptest::prelude::*;
use scope_descent::descent::plan;
use scope_descent::{DefinitionPath, Descent, Error, PathElement, RecordingSink, SinkOp};

/// Steps 0..3 are reusable, 3..5 are unique. The flag is a function of the
/// identity so equal steps always agree on it.
fn element(n: usize) -> PathElement<usize> {
    if is_unique(n) { PathElement::unique(n) } else { PathElement::new(n) }
}

fn to_path(names: Vec<usize>) -> DefinitionPath<usize> {
    names.into_iter().map(element).collect()
}

fn paths() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0usize..5, 0..6), 1..16)
}

fn is_unique(n: usize) -> bool {
    n >= 3
}

/// Expected `(closes, opens)` for a move between two paths of step ids, or
/// `None` when the move must be rejected. Written against plain slices so it
/// shares no code with the planner.
fn expected_move(prev: &[usize], next: &[usize]) -> Option<(usize, usize)> {
    if next.is_empty() {
        return Some((prev.len(), 0));
    }

    let mut shared = 0;
    while shared < prev.len() && shared < next.len() && prev[shared] == next[shared] {
        shared += 1;
    }

    // Keep the shared prefix, unless its last step is a unique previous leaf:
    // then back off to the deepest reusable shared step, or give up.
    let mut keep = shared;
    if shared > 0 && shared == prev.len() && is_unique(prev[shared - 1]) {
        keep = 0;
        for i in (0..shared).rev() {
            if !is_unique(prev[i]) {
                keep = i + 1;
                break;
            }
        }
        if keep == 0 {
            return None;
        }
    }

    // A unique step must not be opened inside an open step with the same id.
    for i in keep..next.len() {
        if is_unique(next[i]) && next[..i].contains(&next[i]) {
            return None;
        }
    }

    Some((prev.len() - keep, next.len() - keep))
}

#[test]
fn test_expected_move_examples() {
    assert_eq!(expected_move(&[0, 1], &[0, 1, 2]), Some((0, 1)));
    assert_eq!(expected_move(&[0, 1], &[0, 2]), Some((1, 1)));
    assert_eq!(expected_move(&[0, 3], &[0, 3, 1]), Some((1, 2)));
    assert_eq!(expected_move(&[0, 3], &[0, 3]), Some((1, 1)));
    assert_eq!(expected_move(&[3], &[3, 0]), None);
    assert_eq!(expected_move(&[3, 4], &[3, 4]), None);
    assert_eq!(expected_move(&[], &[3, 3]), None);
}

proptest! {
    #[test]
    fn prop_balanced_and_minimal(sequence in paths()) {
        let mut sink = RecordingSink::<usize>::new();
        let mut descent = Descent::begin(&mut sink);
        let mut current: Vec<usize> = Vec::new();

        for names in sequence {
            let next = to_path(names.clone());
            let expected = expected_move(&current, &names);
            let planned = plan(descent.path(), &next);
            prop_assert_eq!(planned.is_ok(), expected.is_some());

            let Some((closes, opens)) = expected else {
                continue;
            };
            let (mut d, t) = descent.transition(next.clone()).unwrap();
            prop_assert_eq!((t.close, t.open), (closes, opens));
            // the sink's stack is exactly the descent's path
            prop_assert_eq!(d.sink().open_scopes(), next.steps());
            descent = d;
            current = names;
        }

        let sink = descent.close().unwrap();
        prop_assert_eq!(sink.depth(), 0);
        prop_assert_eq!(sink.opens(), sink.closes());

        // replay: closes pop in reverse order, unique steps never nest in themselves
        let mut stack: Vec<usize> = Vec::new();
        for op in sink.ops() {
            match op {
                SinkOp::Open { name, .. } => {
                    prop_assert!(!(element(*name).is_unique() && stack.contains(name)));
                    stack.push(*name);
                }
                SinkOp::Close { name } => {
                    prop_assert_eq!(stack.pop(), Some(*name));
                }
            }
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn prop_illegal_transition_writes_nothing(prev_ids in prop::collection::vec(0usize..5, 0..6),
                                              next_ids in prop::collection::vec(0usize..5, 0..6)) {
        let prev = to_path(prev_ids.clone());
        let next = to_path(next_ids.clone());
        prop_assume!(expected_move(&[], &prev_ids).is_some());
        let expected = expected_move(&prev_ids, &next_ids).is_none();

        let mut sink = RecordingSink::<usize>::new();
        let descent = Descent::begin(&mut sink).descend(prev).unwrap();
        match descent.descend(next) {
            Ok(descent) => {
                prop_assert!(!expected);
                descent.close().unwrap();
            }
            Err(err) => {
                prop_assert!(expected);
                prop_assert!(matches!(err, Error::IllegalSequencing { .. }), "expected IllegalSequencing, got {:?}", err);
                prop_assert_eq!(sink.closes(), 0);
                prop_assert_eq!(sink.opens(), sink.depth());
            }
        }
    }

    #[test]
    fn prop_collapse_from_any_depth(names in prop::collection::vec(0usize..3, 0..10)) {
        let path = to_path(names);
        let depth = path.len();
        let mut sink = RecordingSink::<usize>::new();
        let descent = Descent::begin(&mut sink).descend(path).unwrap();
        let (descent, t) = descent.transition(DefinitionPath::empty()).unwrap();
        prop_assert_eq!(t.close, depth);
        prop_assert_eq!(descent.depth(), 0);
        prop_assert_eq!(descent.close().unwrap().depth(), 0);
    }
}
