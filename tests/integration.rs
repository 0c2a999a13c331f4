//! Integration tests: load a sheet, compile the header, export comments and rows.

use std::io::Write;
use tabconf::lint::{lint_sheet, LintRule, Severity};
use tabconf::{
    comment_lines, compile, load_sheet, read_table_str, render_row, ExportOptions, ExportTarget, Header,
    SchemaError, Sheet,
};

const ITEM_CSV: &str = "\
key,name,price,,,stats,atk,def
id,name,cost,,,stats,atk,def
int,string,int[2],int,int,dict<2>,int,int
b,b,s,,,c,,
1001,Sword,,10,20,,5,0
//1002,Unused,,1,1,,1,1
,Blank,,1,1,,1,1
1003,Shield,,30,40,,0,8
";

fn cells(row: &[&str]) -> Vec<String> {
    row.iter().map(|s| s.to_string()).collect()
}

fn item_sheet() -> Sheet {
    Sheet::from_rows("item", read_table_str(ITEM_CSV, b',').expect("read"))
}

// ==================== Row blocks ====================

#[test]
fn flat_row_block() {
    let tree = compile(&Header::new(&["id", "count"], &["int", "int"])).expect("compile");
    let out = render_row(&tree, &cells(&["1", "5"]), &ExportOptions::default()).expect("render");
    assert_eq!(out, "[1] = {\n  id = 1,\n  count = 5,\n},");
}

#[test]
fn array_renders_as_container() {
    let header = Header::new(&["id", "list", "", ""], &["int", "int[2]", "int", "int"]);
    let tree = compile(&header).expect("compile");
    let out = render_row(&tree, &cells(&["1", "", "10", "20"]), &ExportOptions::default()).expect("render");
    assert_eq!(
        out,
        "[1] = {\n  id = 1,\n  list = {\n    [1] = 10,\n    [2] = 20,\n  },\n},"
    );
}

#[test]
fn full_sheet_export() {
    let export = item_sheet()
        .compile()
        .expect("compile")
        .export(&ExportOptions::default())
        .expect("export");
    assert_eq!(export.name, "item");
    assert_eq!(export.data.len(), 2);
    let expected = "\
[1001] = {
  id = 1001,
  name = Sword,
  cost = {
    [1] = 10,
    [2] = 20,
  },
  stats = {
    atk = 5,
    def = 0,
  },
},";
    assert_eq!(export.data[0], expected);
    assert!(export.data[1].starts_with("[1003] = {\n  id = 1003,\n  name = Shield,"));

    let lua = export.to_lua();
    assert!(lua.starts_with("--   id "));
    assert!(lua.ends_with("},\n"));
    assert_eq!(lua.lines().count(), export.comments.len() + 2 * 12);
}

#[test]
fn comment_block_lines() {
    let compiled = item_sheet().compile().expect("compile");
    let lines = comment_lines(&compiled.tree, &ExportOptions::default());
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], format!("-- {:<30} {:<10} {}", "  id", "int", "key"));
    assert_eq!(lines[2], format!("-- {:<30} {:<10} {}", "  cost", "int[2]", "price"));
    assert_eq!(lines[3], format!("-- {:<30} {:<10} {}", "    [0]", "int", ""));
    assert_eq!(lines[6], format!("-- {:<30} {:<10} {}", "    atk", "int", "atk"));
}

#[test]
fn commented_row_produces_nothing() {
    let compiled = item_sheet().compile().expect("compile");
    let export = compiled.export(&ExportOptions::default()).expect("export");
    assert!(export.data.iter().all(|block| !block.contains("1002")));
    assert!(export.data.iter().all(|block| !block.contains("Blank")));
}

#[test]
fn bad_id_column_fails_before_rows() {
    let csv = ITEM_CSV.replacen("id,name,cost", "key,name,cost", 1);
    let sheet = Sheet::from_rows("item", read_table_str(&csv, b',').expect("read"));
    assert!(matches!(sheet.compile(), Err(SchemaError::MissingIdColumn { .. })));
}

// ==================== Properties ====================

#[test]
fn rendering_is_repeatable() {
    let compiled = item_sheet().compile().expect("compile");
    let options = ExportOptions::default();
    let (_, row) = compiled.accepted_rows(&options).next().expect("row");
    let first = render_row(&compiled.tree, row, &options).expect("render");
    let second = render_row(&compiled.tree, row, &options).expect("render");
    assert_eq!(first, second);
}

#[test]
fn comments_and_rows_share_field_order() {
    let compiled = item_sheet().compile().expect("compile");
    let options = ExportOptions::default().with_array_base(0);
    let comment_keys: Vec<String> = comment_lines(&compiled.tree, &options)
        .iter()
        .map(|l| l[3..3 + 30].trim().to_string())
        .collect();
    for (_, row) in compiled.accepted_rows(&options) {
        let block = render_row(&compiled.tree, row, &options).expect("render");
        let row_keys: Vec<String> = block
            .lines()
            .skip(1)
            .filter_map(|l| l.split(" = ").next())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.starts_with('}'))
            .collect();
        assert_eq!(row_keys, comment_keys);
    }
}

// ==================== Mode filtering ====================

#[test]
fn server_export_drops_client_columns() {
    let compiled = item_sheet().compile().expect("compile");
    let options = ExportOptions::new().with_target(ExportTarget::Server);
    let export = compiled.export(&options).expect("export");
    assert!(export.data[0].contains("cost = {"));
    assert!(!export.data[0].contains("stats"));
    assert!(!export.comment_text().contains("atk"));
}

#[test]
fn client_export_drops_server_columns() {
    let compiled = item_sheet().compile().expect("compile");
    let options = ExportOptions::new().with_target(ExportTarget::Client);
    let export = compiled.export(&options).expect("export");
    assert!(!export.data[0].contains("cost"));
    assert!(export.data[0].contains("  stats = {\n    atk = 5,"));
}

// ==================== Files and lint ====================

#[test]
fn load_tsv_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("monster.tsv");
    let mut f = std::fs::File::create(&path).expect("create");
    write!(f, "key\thp\nid\thp\nint\tint\nb\tb\n7\t300\n").expect("write");
    drop(f);

    let sheet = load_sheet(&path).expect("load");
    assert_eq!(sheet.name, "monster");
    let export = sheet
        .compile()
        .expect("compile")
        .export(&ExportOptions::default())
        .expect("export");
    assert_eq!(export.data, vec!["[7] = {\n  id = 7,\n  hp = 300,\n},".to_string()]);
}

#[test]
fn short_row_stops_the_export() {
    let csv = format!("{}1004,Bow,,1\n", ITEM_CSV);
    let compiled = Sheet::from_rows("item", read_table_str(&csv, b',').expect("read"))
        .compile()
        .expect("compile");
    let err = compiled.export(&ExportOptions::default()).unwrap_err();
    assert!(err.to_string().contains("row `1004`"), "{}", err);
}

#[test]
fn lint_reports_row_problems() {
    let csv = format!("{}1001,Copy,,1,1,,1,1\nabc,Odd,,1,1,,1,1\n1005,Short\n", ITEM_CSV);
    let compiled = Sheet::from_rows("item", read_table_str(&csv, b',').expect("read"))
        .compile()
        .expect("compile");
    let msgs = lint_sheet(&compiled, &ExportOptions::default());
    let found: Vec<_> = msgs.iter().map(|m| (m.rule, m.row)).collect();
    assert!(found.contains(&(LintRule::DuplicateId, Some(8))));
    assert!(found.contains(&(LintRule::IdNotInteger, Some(9))));
    assert!(found.contains(&(LintRule::ShortRow, Some(10))));
    assert!(msgs.iter().any(|m| m.severity == Severity::Error));
}

#[test]
fn clean_sheet_lints_clean() {
    let compiled = item_sheet().compile().expect("compile");
    let msgs = lint_sheet(&compiled, &ExportOptions::default());
    assert!(msgs.is_empty(), "unexpected findings: {:?}", msgs);
}
