use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use SegmentKind::{Added, Kept, Removed};

fn seg(kind: SegmentKind, line_count: usize) -> DiffSegment {
    DiffSegment::new(kind, line_count)
}

#[test]
fn identical_texts_are_one_kept_run() {
    assert_eq!(diff("a\nb\nc", "a\nb\nc"), vec![seg(Kept, 3)]);
    let lines = ["a", "b"];
    let d = LineDiff::compute(&lines, &lines);
    assert!(d.is_unchanged());
    assert_eq!(d.change_start_line(), None);
    assert_eq!(d.touched_old_lines(), None);
}

#[test]
fn empty_inputs_yield_single_segment() {
    assert_eq!(diff("", "a\nb"), vec![seg(Added, 2)]);
    assert_eq!(diff("a\nb\nc", ""), vec![seg(Removed, 3)]);
    assert!(diff("", "").is_empty());
}

#[test]
fn single_line_edit_is_detected() {
    let old = ["# Title", "body", "tail"];
    let new = ["# Title", "body!", "tail"];
    let d = LineDiff::compute(&old, &new);
    assert_eq!(
        d.segments(),
        &[seg(Kept, 1), seg(Removed, 1), seg(Added, 1), seg(Kept, 1)]
    );
    assert_eq!(d.change_start_line(), Some(2));
    assert_eq!(d.lines_added(), 1);
    assert_eq!(d.lines_removed(), 1);
    assert_eq!(d.shift(), 0);
    assert_eq!(d.touched_old_lines(), Some((2, 2)));
    assert_eq!(d.old_line_for(1), Some(1));
    assert_eq!(d.old_line_for(2), None);
    assert_eq!(d.old_line_for(3), Some(3));
}

#[test]
fn insertion_touches_both_neighbours() {
    let old = ["one", "two", "three"];
    let new = ["one", "two", "inserted", "three"];
    let d = LineDiff::compute(&old, &new);
    assert_eq!(d.shift(), 1);
    assert_eq!(d.change_start_line(), Some(3));
    assert_eq!(d.touched_old_lines(), Some((2, 3)));
    assert_eq!(d.old_line_for(4), Some(3));
}

#[test]
fn trailing_newline_appends_empty_line() {
    let old = ["a", "b"];
    let new = ["a", "b", ""];
    let d = LineDiff::compute(&old, &new);
    assert_eq!(d.segments(), &[seg(Kept, 2), seg(Added, 1)]);
    assert_eq!(d.touched_old_lines(), Some((2, 2)));

    let back = LineDiff::compute(&new, &old);
    assert_eq!(back.segments(), &[seg(Kept, 2), seg(Removed, 1)]);
    assert_eq!(back.touched_old_lines(), Some((3, 3)));
}

#[test]
fn insertion_at_start_touches_first_line() {
    let d = LineDiff::compute(&["x"], &["new", "x"]);
    assert_eq!(d.touched_old_lines(), Some((1, 1)));
    assert_eq!(d.change_start_line(), Some(1));
}

#[test]
fn hull_spans_disjoint_changes() {
    let old = ["a", "b", "c", "d", "e"];
    let new = ["a", "B", "c", "d", "E"];
    let d = LineDiff::compute(&old, &new);
    assert_eq!(
        d.hull(),
        Some(ChangeHull {
            old_start: 1,
            old_end: 5,
            new_start: 1,
            new_end: 5,
        })
    );
    assert_eq!(d.touched_old_lines(), Some((2, 5)));
}

#[test]
fn accepts_owned_and_borrowed_lines() {
    let old: Vec<String> = vec!["a".into(), "b".into()];
    let new = ["a", "c"];
    let d = LineDiff::compute(&old, &new);
    assert_eq!(d.old_line_count(), 2);
    assert_eq!(d.new_line_count(), 2);
    assert_eq!(d.lines_removed(), 1);
}

fn line_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![Just("a"), Just("b"), Just(""), Just("# h"), Just("- x")]
            .prop_map(String::from),
        0..24,
    )
}

proptest! {
    #[test]
    fn segments_reconstruct_both_inputs(old in line_list(), new in line_list()) {
        let d = LineDiff::compute(&old, &new);
        let kept: usize = d.segments().iter().filter(|s| s.kind == Kept).map(|s| s.line_count).sum();
        prop_assert_eq!(kept + d.lines_removed(), old.len());
        prop_assert_eq!(kept + d.lines_added(), new.len());
        prop_assert!(d.segments().iter().all(|s| s.line_count > 0));
        prop_assert!(d.segments().windows(2).all(|w| w[0].kind != w[1].kind));
    }

    #[test]
    fn kept_lines_map_to_equal_text(old in line_list(), new in line_list()) {
        let d = LineDiff::compute(&old, &new);
        for (index, line) in new.iter().enumerate() {
            if let Some(old_line) = d.old_line_for(index + 1) {
                prop_assert_eq!(&old[old_line - 1], line);
            }
        }
    }

    #[test]
    fn diff_is_deterministic(old in line_list(), new in line_list()) {
        prop_assert_eq!(LineDiff::compute(&old, &new), LineDiff::compute(&old, &new));
    }
}
