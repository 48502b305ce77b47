use xpa_core::{Assigner, AssignmentConfig, Identifier};
use xpa_sim::{
    from_json_slice, n_different_users, render_html, render_text, to_canonical_json_bytes,
    to_csv_bytes, write_bytes, AssignmentRow, AssignmentTable, ColorMap,
};

fn small_table() -> AssignmentTable {
    let assigner = Assigner::new(AssignmentConfig::default()).expect("config");
    n_different_users(&assigner, 3).expect("table")
}

#[test]
fn html_paints_mapped_labels() {
    let html = render_html(&small_table(), &ColorMap::default());
    assert!(html.contains("<th>identifier</th><th>color</th>"));
    assert!(html.contains(
        "<tr><td>1</td><td style=\"color: red; background-color: red\">red</td></tr>"
    ));
    assert!(html.contains(
        "<tr><td>2</td><td style=\"color: blue; background-color: blue\">blue</td></tr>"
    ));
}

#[test]
fn unmapped_labels_render_plain() {
    let html = render_html(&small_table(), &ColorMap::empty());
    assert!(!html.contains("style="));
    assert!(html.contains("<tr><td>0</td><td>red</td></tr>"));
}

#[test]
fn rendering_leaves_table_untouched() {
    let table = small_table();
    let before = table.clone();
    let colors = ColorMap::default().with("red", "purple");
    let _ = render_html(&table, &colors);
    let text = render_text(&table, &colors);
    assert_eq!(table, before);
    assert!(text.lines().next().expect("header").starts_with("identifier"));
    assert!(text.contains("purple"));
}

#[test]
fn csv_has_identifier_and_key_columns() {
    let csv = String::from_utf8(to_csv_bytes(&small_table()).expect("csv")).expect("utf8");
    assert_eq!(csv, "identifier,color\n0,red\n1,red\n2,blue\n");
}

#[test]
fn canonical_json_round_trips() {
    let table = small_table();
    let bytes = to_canonical_json_bytes(&table).expect("json");
    let text = String::from_utf8(bytes.clone()).expect("utf8");
    assert!(text.starts_with("{\"key\":\"color\",\"rows\":[{\"identifier\":\"0\",\"label\":\"red\"}"));
    let decoded: AssignmentTable = from_json_slice(&bytes).expect("decode");
    assert_eq!(decoded, table);
}

#[test]
fn write_bytes_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/out/table.csv");
    write_bytes(&path, b"identifier,color\n").expect("write");
    assert_eq!(std::fs::read(&path).expect("read"), b"identifier,color\n");
}

#[test]
fn text_columns_align_for_non_ascii_values() {
    let table = AssignmentTable {
        key: "color".to_string(),
        rows: vec![
            AssignmentRow {
                identifier: Identifier::new("zoë-ångström").expect("id"),
                label: "grön-blå".to_string(),
            },
            AssignmentRow {
                identifier: Identifier::new("7").expect("id"),
                label: "red".to_string(),
            },
        ],
    };
    let text = render_text(&table, &ColorMap::empty());
    let color_columns: Vec<usize> = text
        .lines()
        .map(|line| {
            let last = line.split_whitespace().last().expect("color cell");
            line.chars().count() - last.chars().count()
        })
        .collect();
    assert_eq!(color_columns.len(), 3);
    assert!(color_columns.iter().all(|col| *col == color_columns[0]));
    // "zoë-ångström" is 12 characters, "grön-blå" is 8.
    assert_eq!(color_columns[0], 12 + 2 + 8 + 2);
}
