//! End-to-end template scenarios: bindings in, Markdown out.

use std::collections::HashMap;

use markdown_loom_engine::{Document, Heading, Node, Table, Value, format, format_values};
use pretty_assertions::assert_eq;

const ROWS: &str = "item,qty\napple,3\npear,12";

fn bind(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), Value::from_auto(value)))
        .collect()
}

#[test]
fn report_from_a_single_template() {
    let out = format_values(
        "{title:heading}\n{intro}\n{rows:csv}",
        &[("title", "Report"), ("intro", "All good."), ("rows", ROWS)],
    )
    .unwrap();

    assert_eq!(
        out,
        "\n# Report\n\nAll good.\n\n| item  | qty |\n|-------|-----|\n| apple | 3   |\n| pear  | 12  |\n"
    );
}

#[test]
fn table_sorts_descending_from_the_spec() {
    let out = format_values("{rows:csv:sort=item>}", &[("rows", ROWS)]).unwrap();
    assert_eq!(
        out,
        "\n| item  | qty |\n|-------|-----|\n| pear  | 12  |\n| apple | 3   |\n"
    );
}

#[test]
fn table_filter_keeps_exact_matches_only() {
    let out = format_values("{rows:csv:filter=item=pear}", &[("rows", ROWS)]).unwrap();
    assert_eq!(out, "\n| item | qty |\n|------|-----|\n| pear | 12  |\n");
}

#[test]
fn table_columns_rename_and_reorder() {
    let out =
        format_values("{rows:csv:order=Product=item,Count=qty}", &[("rows", ROWS)]).unwrap();
    assert_eq!(
        out,
        "\n| Product | Count |\n|---------|-------|\n| apple   | 3     |\n| pear    | 12    |\n"
    );
}

#[test]
fn table_right_alignment_from_the_spec() {
    let out = format_values("{rows:csv:align=right}", &[("rows", ROWS)]).unwrap();
    assert_eq!(
        out,
        "\n|  item | qty |\n|------:|----:|\n| apple |   3 |\n|  pear |  12 |\n"
    );
}

#[test]
fn deferral_survives_exactly_the_requested_passes() {
    let template = "Hi {name}: {rows:{2}:csv}";

    let first = format_values(template, &[("name", "Ann")]).unwrap();
    assert_eq!(first, "Hi Ann: {{rows:csv}}");

    let second = format_values(&first, &[]).unwrap();
    assert_eq!(second, "Hi Ann: {rows:csv}");

    let third = format_values(&second, &[("rows", "a,b\n1,2")]).unwrap();
    assert_eq!(third, "Hi Ann: \n| a | b |\n|---|---|\n| 1 | 2 |\n");
}

#[test]
fn file_contents_flow_into_a_code_block() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.rs");
    std::fs::write(&path, "fn main() {}").unwrap();

    let template = format!("{{[{}]:codeblock=lang=rust}}", path.display());
    let out = format(&template, &HashMap::new()).unwrap();
    assert_eq!(out, "\n```rust\nfn main() {}\n```\n");
}

#[test]
fn link_component_with_named_arguments() {
    let out = format_values(
        "{url:link=label=docs}",
        &[("url", "https://example.com/")],
    )
    .unwrap();
    assert_eq!(out, "[docs](https://example.com/)");
}

#[test]
fn list_component_with_flags() {
    let mut bindings = HashMap::new();
    bindings.insert(
        "items".to_string(),
        Value::List(vec![Value::from("a"), Value::from("b")]),
    );

    let out = format("{items:list=ordered=true}", &bindings).unwrap();
    assert_eq!(out, "\n1. a\n2. b\n");
}

#[test]
fn unresolved_fields_pass_through_for_a_later_run() {
    let out = format_values("{greeting}, {name}", &[("greeting", "Hello")]).unwrap();
    assert_eq!(out, "Hello, name");
}

#[test]
fn document_snapshot() {
    let mut doc = Document::default();
    doc.push(Node::Heading(Heading::new(Value::from("Inventory"), 1)));
    doc.push("Current stock levels.");
    doc.push(Node::Table(Table::new(
        vec!["item".into(), "qty".into()],
        vec![
            vec!["apple".into(), "3".into()],
            vec!["pear".into(), "12".into()],
        ],
    )));

    insta::assert_snapshot!(doc.render(), @r"
    # Inventory


    Current stock levels.


    | item  | qty |
    |-------|-----|
    | apple | 3   |
    | pear  | 12  |
    ");
}

#[test]
fn document_html_rendering() {
    let doc = Document::new(vec![Value::from("# Title"), Value::from("Some *body* text.")]);
    assert_eq!(
        doc.to_html(),
        "<h1>Title</h1>\n<p>Some <em>body</em> text.</p>\n"
    );
}

#[test]
fn template_output_feeds_document_sections() {
    let section = format_values("{q:quote}", &[("q", "stay curious")]).unwrap();
    let doc = Document::new(vec![Value::from("# Notes"), Value::Str(section)]);
    assert_eq!(doc.render(), "# Notes\n\n\n> stay curious\n");
}

#[test]
fn bindings_survive_mixed_value_types() {
    let mut bindings = bind(&[("count", "4"), ("ratio", "0.5")]);
    bindings.insert(
        "table".to_string(),
        Value::from(Node::Table(Table::from_rows(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ]))),
    );

    let out = format("{count:3} {ratio:.1f} {table}", &bindings).unwrap();
    assert_eq!(out, "  4 0.5 \n| a | b |\n|---|---|\n| 1 | 2 |\n");
}
