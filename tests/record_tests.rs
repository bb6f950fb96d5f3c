use rzinesync::errors::AppError;
use rzinesync::lst::{SiteRoots, load_bytes, load_text, load_with_report, save_text};
use rzinesync::models::{ColumnDefinition, ColumnType, Row, RowKind, Table};

mod common;
use common::SAMPLE_LST;

fn site() -> SiteRoots {
    SiteRoots::default()
}

#[test]
fn test_load_reads_series_and_preamble() {
    let t = load_text(&site(), SAMPLE_LST);

    assert_eq!(t.name, "Fanac Test Zine");
    assert_eq!(t.editors, "Bob Tucker");
    assert_eq!(t.dates, "1950-1952");
    assert_eq!(t.fanzine_type, "Genzine");
    assert_eq!(t.preamble, vec!["A short-lived genzine.".to_string()]);
    assert!(t.alphabetize_individually);
    assert!(!t.complete);
}

#[test]
fn test_load_canonicalizes_headers_and_prepends_filename() {
    let t = load_text(&site(), SAMPLE_LST);
    let names: Vec<&str> = t.columns.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, ["Filename", "Issue", "Year", "Month", "Pages", "Mailing"]);
    assert_eq!(t.columns[2].col_type, ColumnType::Year);
    assert_eq!(t.columns[4].col_type, ColumnType::Int);
}

#[test]
fn test_load_rows_and_kinds() {
    let t = load_text(&site(), SAMPLE_LST);

    assert_eq!(t.rows.len(), 4);
    assert_eq!(t.rows[0].kind, RowKind::TextLine);
    assert_eq!(t.rows[0].source_identifier(), "<h2>1950</h2>");

    let first = &t.rows[1];
    assert_eq!(first.kind, RowKind::Normal);
    assert_eq!(first.cells, ["tz01.pdf", "Issue 1", "1950", "May", "12", "FAPA 51"]);

    assert_eq!(t.rows[3].source_identifier(), "http://example.com/tz03.html");
    assert_eq!(t.rows[3].cell(4), "8");
    assert!(t.rows.iter().all(|r| r.cells.len() == t.num_cols()));
}

#[test]
fn test_save_relinks_mailings_and_packs_first_column() {
    let t = load_text(&site(), SAMPLE_LST);
    let out = save_text(&site(), &t).unwrap();

    assert!(out.starts_with("Fanac Test Zine;Bob Tucker;1950-1952;Genzine\n\n"));
    assert!(out.contains("<p>A short-lived genzine.</p>\n"));
    assert!(out.contains("<!-- fanac-instructions: Alphabetize individually -->\n"));
    assert!(out.contains("\nIssue;Year;Month;Pages;Mailing\n"));
    assert!(out.contains("\n<h2>1950</h2>;\n"));
    assert!(out.contains(
        r#"tz01.pdf>Issue 1;1950;May;12;<a href="https://fanac.org/fanzines/APA_Mailings/FAPA/FAPA51.html">FAPA 51</a>"#
    ));
    assert!(out.contains("\ntz02.pdf>Issue 2;1950;Aug;10;\n"));
    assert!(out.contains(r#"<a href="http://example.com/tz03.html">Issue 3;1951;;8;"#));
}

#[test]
fn test_save_reload_save_is_byte_identical() {
    let s = site();
    let first = save_text(&s, &load_text(&s, SAMPLE_LST)).unwrap();
    let second = save_text(&s, &load_text(&s, &first)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_trimming_drops_empty_columns_and_trailing_rows() {
    let s = site();
    let raw = "Zine;Ed;1960;\n\nIssue;Year;Pages;Notes\nz1.pdf>Z 1;1960;4;\nz2.pdf>Z 2;1961;6;\n;;;\n\n;;;\n";

    let t = load_text(&s, raw);
    let out = save_text(&s, &t).unwrap();
    assert!(out.contains("\nIssue;Year;Pages\n"));
    assert!(out.ends_with("z2.pdf>Z 2;1961;6\n"));

    let again = save_text(&s, &load_text(&s, &out)).unwrap();
    assert_eq!(out, again);
}

#[test]
fn test_locale_block_round_trips() {
    let s = site();
    let raw = "Zine;Ed;1960;\n\n<locale>\nLondon\nEngland\n</locale>\n\nIssue;Year;Pages\nz1.pdf>Z 1;1960;4\n";
    let t = load_text(&s, raw);
    assert_eq!(t.locale, vec!["London".to_string(), "England".to_string()]);

    let out = save_text(&s, &t).unwrap();
    assert!(out.contains("<locale>\nLondon\nEngland\n</locale>\n"));

    let single = "Zine;Ed;1960;\n\n<locale>Boston</locale>\n\nIssue;Year;Pages\nz1.pdf>Z 1;1960;4\n";
    let t = load_text(&s, single);
    assert_eq!(t.locale, vec!["Boston".to_string()]);
    assert!(save_text(&s, &t).unwrap().contains("<locale>Boston</locale>\n"));
}

#[test]
fn test_undecodable_cell_is_reported_not_fatal() {
    let raw = "Zine;Ed;1960;\n\nIssue;Year;Pages\na>b>c;1960;4\nz2.pdf>Z 2;1961;6\n";
    let outcome = load_with_report(&site(), raw);

    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].line, 4);
    assert_eq!(outcome.issues[0].packed, "a>b>c");
    assert_eq!(outcome.table.rows.len(), 2);
    assert_eq!(outcome.table.rows[0].source_identifier(), "");
    assert_eq!(outcome.table.rows[0].cell(2), "1960");
}

#[test]
fn test_latin1_bytes_are_accepted() {
    let mut bytes = b"Caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b" Zine;Ed;1960;\n\nIssue;Year;Pages\nz1.pdf>Z 1;1960;4\n");

    let t = load_bytes(&site(), &bytes);
    assert_eq!(t.name, "Café Zine");
    assert_eq!(t.rows.len(), 1);
}

#[test]
fn test_unencodable_row_rejects_the_whole_save() {
    let mut t = load_text(&site(), SAMPLE_LST);
    let mut bad = Row::empty(t.num_cols());
    bad.set_source_identifier("<b unterminated");
    bad.cells[2] = "1952".into();
    t.push_row(bad);

    match save_text(&site(), &t) {
        Err(AppError::Encode { row, reason }) => {
            assert_eq!(row, 5);
            assert!(reason.contains("<b unterminated"));
        }
        other => panic!("expected an encode error, got {other:?}"),
    }
}

#[test]
fn test_too_few_columns_is_a_structure_error() {
    let mut t = Table::new();
    t.columns.push(ColumnDefinition::new("Year", ColumnType::Year));
    t.push_row(Row::from_cells(vec!["z1.pdf".into(), "Z 1".into(), "1960".into()]));

    assert!(matches!(save_text(&site(), &t), Err(AppError::Structure(_))));
}

#[test]
fn test_no_rows_is_a_structure_error() {
    let raw = "Zine;Ed;1960;\n\nIssue;Year;Pages\n";
    let t = load_text(&site(), raw);
    assert!(matches!(save_text(&site(), &t), Err(AppError::Structure(_))));
}

#[test]
fn test_column_edits_keep_rows_rectangular() {
    let mut t = load_text(&site(), SAMPLE_LST);
    let cols = t.num_cols();

    t.insert_column(3, ColumnDefinition::plain("Editor"));
    assert_eq!(t.num_cols(), cols + 1);
    assert!(t.rows.iter().all(|r| r.cells.len() == cols + 1));
    assert_eq!(t.rows[1].cell(4), "May");

    assert!(!t.delete_column(1));
    assert!(t.delete_column(3));
    assert_eq!(t.rows[1].cell(3), "May");
    assert_eq!(t.find_row_by_filename("tz02.pdf"), Some(2));
}

#[test]
fn test_mailing_cells_split_into_links_and_keep_postmailing() {
    let lst = SAMPLE_LST.replace(
        "tz02.pdf>Issue 2;1950;Aug;10;",
        "tz02.pdf>Issue 2;1950;Aug;10;FAPA 51 & SAPS 3 postmailing",
    );
    let t = load_text(&site(), &lst);
    assert_eq!(t.rows[2].cell(5), "FAPA 51 & SAPS 3 postmailing");

    let out = save_text(&site(), &t).unwrap();
    assert!(out.contains(concat!(
        r#"tz02.pdf>Issue 2;1950;Aug;10;"#,
        r#"<a href="https://fanac.org/fanzines/APA_Mailings/FAPA/FAPA51.html">FAPA 51</a> & "#,
        r#"<a href="https://fanac.org/fanzines/APA_Mailings/SAPS/SAPS3.html">SAPS 3</a> postmailing"#,
    )));

    let reloaded = load_text(&site(), &out);
    assert_eq!(reloaded.rows[2].cell(5), "FAPA 51 & SAPS 3 postmailing");
}
