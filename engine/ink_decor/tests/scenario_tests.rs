#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end decoration scenarios through the default engine
//! (GFM parser, built-in code tokenizers).

use ink_decor::Engine;
use ink_ir::{Block, BlockKind, DecorationLine};
use pretty_assertions::assert_eq;

fn labels(line: &DecorationLine) -> Vec<Option<&str>> {
    line.labels().iter().map(|label| label.as_deref()).collect()
}

#[test]
fn heading_line() {
    let mut engine = Engine::new();
    let report = engine.update("# Title").unwrap();

    assert!(report.full_reparse);
    let line = engine.line_decorations(1).unwrap();
    assert_eq!(labels(&line), vec![Some("heading heading-1"); 7]);
    assert!(engine.is_fully_decorated());
}

#[test]
fn checked_task_item() {
    let mut engine = Engine::new();
    engine.update("- [x] done").unwrap();
    let line = engine.line_decorations(1).unwrap();
    let line = labels(&line);

    assert_eq!(line.len(), 10);
    assert_eq!(line[0], Some("list list-item list-item-pre"));
    assert_eq!(line[1], Some("list list-item list-item-pre"));
    assert!(line[2].unwrap().starts_with("list list-item tasklist checked"));
    assert!(line[3]
        .unwrap()
        .starts_with("list list-item tasklist-inner checked"));
    assert!(line[4].unwrap().starts_with("list list-item tasklist checked"));
    assert!(line.iter().all(|label| label.unwrap().contains("list-item")));
    assert!(line[9].unwrap().ends_with("paragraph"));
}

#[test]
fn edit_at_end_of_long_document_touches_one_line() {
    let paragraphs: Vec<String> = (1..=100).map(|n| format!("paragraph {n}")).collect();
    let before = paragraphs.join("\n\n");
    let after = format!("{before}!");

    let mut engine = Engine::new();
    engine.update(&before).unwrap();
    let old = engine.state().clone();
    assert_eq!(old.line_count(), 199);

    let report = engine.update(&after).unwrap();
    assert_eq!(report.recomputed_lines, 1);
    assert!(!report.full_reparse);
    assert_eq!(report.span.as_ref().map(|span| span.from_line), Some(197));

    let new = engine.state();
    for line in 1..199 {
        let (old_line, new_line) = (old.decoration(line).unwrap(), new.decoration(line).unwrap());
        assert!(old_line.ptr_eq(new_line), "line {line} was not reused");
    }
    assert_eq!(new.decoration(199).unwrap().len(), "paragraph 100!".len());
}

#[test]
fn splitting_a_paragraph_shifts_later_blocks() {
    let before = "first line\nsecond line\n\nafter\n\n# Tail\n\nlast";
    let after = "first line\n\nsecond line\n\nafter\n\n# Tail\n\nlast";

    let mut engine = Engine::new();
    engine.update(before).unwrap();
    let report = engine.update(after).unwrap();

    assert_eq!(report.shift, 1);
    assert!(!report.full_reparse);
    let paragraph = |line| Block::new(BlockKind::Node("paragraph"), line, line);
    assert_eq!(
        engine.state().blocks().as_slice(),
        &[
            paragraph(1),
            Block::empty(2, 2),
            paragraph(3),
            Block::empty(4, 4),
            paragraph(5),
            Block::empty(6, 6),
            Block::new(BlockKind::Node("heading"), 7, 7),
            Block::empty(8, 8),
            paragraph(9),
        ]
    );
    assert_eq!(engine.state().validate(), Ok(()));
}

#[test]
fn link_label_equal_to_url_text() {
    let mut engine = Engine::new();
    engine.update("[text](https://text)").unwrap();
    let line = engine.line_decorations(1).unwrap();
    let line = labels(&line);

    for label in &line[1..5] {
        assert_eq!(*label, Some("paragraph link"));
    }
    for label in &line[7..19] {
        assert_eq!(*label, Some("paragraph link link-url"));
    }
    assert_eq!(line[19], Some("paragraph link"));
}

#[test]
fn fenced_code_gets_token_labels() {
    let mut engine = Engine::new();
    engine.update("```rust\nlet x = 1;\n```").unwrap();

    let open = engine.line_decorations(1).unwrap();
    assert_eq!(open.get(0), Some("code code-start"));
    let body = engine.line_decorations(2).unwrap();
    assert_eq!(body.get(0), Some("code token keyword"));
    assert_eq!(body.get(3), Some("code"));
    assert_eq!(body.get(8), Some("code token number"));
    let close = engine.line_decorations(3).unwrap();
    assert_eq!(close.get(2), Some("code code-end"));
}

#[test]
fn unchanged_update_is_idempotent() {
    let text = "# A\n\n- one\n- two\n\n```js\nf(1)\n```\n\n| a | b |\n| - | - |\n| 1 | 2 |";
    let mut engine = Engine::new();
    engine.update(text).unwrap();
    let first = engine.state().clone();

    let report = engine.update(text).unwrap();
    assert!(report.is_unchanged());
    assert_eq!(report.recomputed_lines, 0);
    assert!(first.same_decorations(engine.state()));
    for (old, new) in first.decorations().iter().zip(engine.state().decorations()) {
        assert!(old.ptr_eq(new));
    }
}

#[test]
fn table_cells_and_separators() {
    let mut engine = Engine::new();
    engine.update("| a | b |\n| - | - |\n| 1 | 2 |").unwrap();

    let header = engine.line_decorations(1).unwrap();
    assert_eq!(header.get(0), Some("table table-header table-separator"));
    assert_eq!(header.get(2), Some("table table-header"));
    let delimiter = engine.line_decorations(2).unwrap();
    assert_eq!(delimiter.get(2), Some("table table-delimiter"));
    let content = engine.line_decorations(3).unwrap();
    assert_eq!(content.get(6), Some("table table-content"));
}

#[test]
fn labels_always_match_line_lengths() {
    let mut engine = Engine::new();
    let texts = [
        "é *ü* `ß`",
        "é *ü* `ß`\n> 引用 [x](y)",
        "> 引用 [x](y)\n\n- [ ] ☐",
        "",
    ];
    for text in texts {
        engine.update(text).unwrap();
        assert_eq!(engine.state().validate(), Ok(()));
        for (line, decoration) in engine.state().lines().zip(engine.state().decorations()) {
            assert_eq!(line.chars().count(), decoration.len());
        }
    }
}

#[test]
fn reset_starts_over() {
    let mut engine = Engine::new();
    engine.update("a").unwrap();
    engine.reset();
    assert!(engine.state().is_empty());
    let report = engine.update("a").unwrap();
    assert!(report.full_reparse);
}
