//! Incremental updates must end in the state a from-scratch decoration of
//! the same text produces.
//!
//! Deterministic edit scripts cover the constructs that reach across block
//! boundaries (fences, lists, setext underlines, link and footnote
//! definitions, nested definitions); the property test replays random line
//! edits over a small markdown vocabulary.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use ink_decor::{Engine, EngineConfig};
use ink_lexer::Languages;
use ink_parse::MarkdownParser;
use proptest::prelude::*;

fn assert_matches_scratch(engine: &Engine, text: &str) {
    let scratch = engine.decorate_from_scratch(text).unwrap();
    let state = engine.state();
    assert_eq!(state.validate(), Ok(()));
    assert_eq!(state.text(), text);
    assert_eq!(state.blocks(), scratch.blocks(), "blocks differ for {text:?}");
    assert!(
        state.same_decorations(&scratch),
        "decorations differ for {text:?}"
    );
}

fn replay(script: &[&str]) {
    let mut engine = Engine::new();
    for text in script {
        engine.update(text).unwrap();
        assert_matches_scratch(&engine, text);
    }
}

#[test]
fn fence_opened_and_closed() {
    replay(&[
        "intro\n\ncode?\n\nmiddle\n\n# end",
        "intro\n\n```\n\nmiddle\n\n# end",
        "intro\n\n```\n\nmiddle\n\n```\n\n# end",
        "intro\n\n```js\n\nmiddle\n\n```\n\n# end",
        "intro\n\n\nmiddle\n\n```\n\n# end",
    ]);
}

#[test]
fn lists_merge_and_split() {
    replay(&[
        "- a\n\npara\n\n- b\n\ntail",
        "- a\n\n- x\n\n- b\n\ntail",
        "- a\n- x\n- b\n\ntail",
        "- a\n\n1. x\n\n- b\n\ntail",
        "- a\n\n- [ ] x\n\n- b\n\ntail",
    ]);
}

#[test]
fn setext_underline_added_and_removed() {
    replay(&[
        "title\n\nbody\n\nmore",
        "title\n===\n\nbody\n\nmore",
        "title\n===\nbody\n\nmore",
        "title\n\nbody\n\nmore",
    ]);
}

#[test]
fn definitions_come_and_go() {
    replay(&[
        "see [a]\n\none\n\ntwo\n\nthree",
        "see [a]\n\none\n\ntwo\n\n[a]: /url",
        "see [a] and [b]\n\none\n\ntwo\n\n[a]: /url",
        "see [a] and [b]\n\n[b]: /b\n\ntwo\n\n[a]: /url",
        "see [a] and [b]\n\none\n\ntwo\n\n[a]: /url",
        "see [a] and [b]\n\none\n\ntwo\n\nthree",
    ]);
}

#[test]
fn thematic_break_after_a_definition() {
    replay(&[
        "---\n\n\n",
        "[a]: /u\n---\n\n\n",
        "[a]: /u\n---\n# Head\n\n",
        "[a]: /u\n---\n# Head\n\nsee [a]\n",
    ]);
}

#[test]
fn thematic_break_after_a_setext_heading() {
    replay(&[
        "para\n===\n---\n\n# Head\n\n\n\n\n",
        "para\n===\n---\n~~~\n# Head\n\n\n\n\n",
        "para\n===\n---\n~~~\n# Head\n\nx\n\n\n",
        "para\n===\n\n~~~\n# Head\n\nx\n\n\n",
    ]);
}

#[test]
fn indented_lines_after_a_definition() {
    replay(&[
        "[a]: /u\n\npara\n\ntail",
        "[a]: /u\n\t- t\npara\n\ntail",
        "[a]: /u\n\t- t\n\n    indented\n\ntail",
        "[a]: /u\n  cont\n\n    indented\n\ntail [a]",
    ]);
}

#[test]
fn nested_definition_resolves_an_edited_reference() {
    replay(&[
        "see [a]\n\np\n\nq\n\n> [a]: /u",
        "see [a]!\n\np\n\nq\n\n> [a]: /u",
        "see [a]!\n\np\n\nq\n\n- [a]: /u",
        "see [a]!\n\np\n\nq\n\n- [b]: /u",
    ]);
}

#[test]
fn footnote_reference_far_from_its_definition() {
    replay(&[
        "a [^1] b\n\np\n\nq\n\nr\n\n[^1]: note",
        "a [^1] b!\n\np\n\nq\n\nr\n\n[^1]: note",
        "a [^1] b!\n\np\n\nq\n\nr\n\n[^2]: note",
        "a [^1] b!\n\np\n\n[^1]: note\n\nr\n\n[^2]: note",
    ]);
}

#[test]
fn lines_inserted_and_deleted_everywhere() {
    replay(&[
        "# h\n\np1\n\np2\n\n> q\n\np3",
        "x\n# h\n\np1\n\np2\n\n> q\n\np3",
        "x\n# h\n\np1\np1b\n\np2\n\n> q\n\np3",
        "x\n# h\n\np1\np1b\n\n> q\n\np3",
        "x\n# h\n\np1\np1b\n\n> q\n\np3\n",
        "x\n# h\n\np1\np1b\n\n> q\n\np3\n\n",
        "",
        "# h",
    ]);
}

#[test]
fn tables_gain_and_lose_rows() {
    replay(&[
        "before\n\n| a | b |\n\nafter",
        "before\n\n| a | b |\n| - | - |\n\nafter",
        "before\n\n| a | b |\n| - | - |\n| 1 | 2 |\nafter",
        "before\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\nafter",
    ]);
}

#[test]
fn zero_context_still_converges_on_fences() {
    let mut engine = Engine::with_parts(
        MarkdownParser::new(),
        Languages::builtin(),
        EngineConfig::default().with_context_blocks(0),
    );
    for text in [
        "a\n\nb\n\nc\n\nd",
        "a\n\n```\n\nc\n\nd",
        "a\n\n```\n\nc\n\n```",
    ] {
        engine.update(text).unwrap();
        assert_matches_scratch(&engine, text);
    }
}

const VOCABULARY: &[&str] = &[
    "",
    "",
    "# Head",
    "para text",
    "more text",
    "- item",
    "- [x] task",
    "1. one",
    "> quote",
    "```",
    "let x = 1;",
    "***",
    "===",
    "[a]: /url",
    "see [a]",
    "| x | y |",
    "| - | - |",
    "---",
    "[^1]",
    "[^1]: note",
    "> [a]: /u",
    "- [a]: /u",
    "\t- t",
    "    indented",
    "  cont",
];

#[derive(Clone, Debug)]
enum Edit {
    Replace(usize, usize),
    Insert(usize, usize),
    Delete(usize),
    Append(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    let word = 0..VOCABULARY.len();
    prop_oneof![
        (any::<usize>(), word.clone()).prop_map(|(at, word)| Edit::Replace(at, word)),
        (any::<usize>(), word).prop_map(|(at, word)| Edit::Insert(at, word)),
        any::<usize>().prop_map(Edit::Delete),
        any::<usize>().prop_map(Edit::Append),
    ]
}

fn apply(lines: &mut Vec<String>, edit: &Edit) {
    match *edit {
        Edit::Replace(at, word) => {
            let at = at % lines.len();
            lines[at] = VOCABULARY[word].to_owned();
        }
        Edit::Insert(at, word) => {
            let at = at % (lines.len() + 1);
            lines.insert(at, VOCABULARY[word].to_owned());
        }
        Edit::Delete(at) => {
            if lines.len() > 1 {
                let at = at % lines.len();
                lines.remove(at);
            }
        }
        Edit::Append(at) => {
            let at = at % lines.len();
            lines[at].push('x');
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn random_edits_match_scratch(
        start in prop::collection::vec(0..VOCABULARY.len(), 1..14),
        edits in prop::collection::vec(edit_strategy(), 1..6),
    ) {
        let mut lines: Vec<String> = start.iter().map(|&word| VOCABULARY[word].to_owned()).collect();
        let mut engine = Engine::new();
        engine.update(&lines.join("\n")).unwrap();

        for edit in &edits {
            apply(&mut lines, edit);
            let text = lines.join("\n");
            engine.update(&text).unwrap();

            let scratch = engine.decorate_from_scratch(&text).unwrap();
            prop_assert_eq!(engine.state().validate(), Ok(()));
            prop_assert_eq!(engine.state().blocks(), scratch.blocks());
            prop_assert!(engine.state().same_decorations(&scratch), "text: {:?}", text);
        }
    }
}
