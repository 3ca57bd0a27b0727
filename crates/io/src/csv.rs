// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use csvedit_engine::cell::{parse_number, Cell};
use csvedit_engine::Grid;

use crate::error::IoError;

/// A row that was shorter than the widest row and got padded with nulls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 1-based line in the source text
    pub line: u64,
    /// Grid row the record landed in
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub grid: Grid,
    pub issues: Vec<ParseIssue>,
    pub delimiter: u8,
}

/// Read a file from disk, decode and parse it.
pub fn import(path: &Path) -> Result<ParseOutcome, IoError> {
    let content = read_file_as_utf8(path)?;
    parse_str(&content)
}

/// Parse raw bytes (UTF-8, or Windows-1252 when not valid UTF-8).
pub fn parse(bytes: &[u8]) -> Result<ParseOutcome, IoError> {
    parse_str(&decode(bytes.to_vec()))
}

/// Parse delimited text into a rectangular grid.
///
/// Every line is data (there is no header row). Empty lines are skipped.
/// The delimiter is sniffed from the first lines. Fields are typed: `true`
/// / `TRUE` / `false` / `FALSE` become booleans, finite numbers become
/// numbers, empty fields become null, everything else stays text.
pub fn parse_str(content: &str) -> Result<ParseOutcome, IoError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let delimiter = sniff_delimiter(content);
    log::debug!("parsing CSV with delimiter {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut lines: Vec<u64> = Vec::new();
    for result in reader.records() {
        let record = result?;
        lines.push(record.position().map_or(0, |p| p.line()));
        rows.push(record.iter().map(typed_field).collect());
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut issues = Vec::new();
    for (row, (cells, &line)) in rows.iter_mut().zip(lines.iter()).enumerate() {
        if cells.len() < width {
            issues.push(ParseIssue { line, row, expected: width, found: cells.len() });
            cells.resize(width, Cell::Null);
        }
    }
    if !issues.is_empty() {
        log::warn!("{} ragged row(s) padded to {} column(s)", issues.len(), width);
    }

    let grid = Grid::from_rows(rows).map_err(|e| IoError::Parse { message: e.to_string(), line: None })?;
    Ok(ParseOutcome { grid, issues, delimiter })
}

fn typed_field(field: &str) -> Cell {
    match field {
        "" => Cell::Null,
        "true" | "TRUE" => Cell::Bool(true),
        "false" | "FALSE" => Cell::Bool(false),
        _ => match parse_number(field) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(field.to_string()),
        },
    }
}

/// Pick the delimiter from the first ten non-empty lines.
///
/// A candidate must split the first line into at least two fields. Among
/// those, the winner maximizes (lines agreeing with the first line's field
/// count) x (that count). Ties keep the earlier candidate in `\t ; , |`
/// order; nothing viable means comma.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().filter(|l| !l.is_empty()).take(10).collect();
    let Some(first) = sample.first() else {
        return b',';
    };

    [b'\t', b';', b',', b'|']
        .into_iter()
        .filter_map(|delim| {
            let width = field_count(first, delim);
            if width < 2 {
                return None;
            }
            let agreeing = sample.iter().filter(|line| field_count(line, delim) == width).count();
            Some((delim, agreeing * width))
        })
        .fold(None, |best: Option<(u8, usize)>, (delim, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((delim, score)),
        })
        .map_or(b',', |(delim, _)| delim)
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map_or(1, |r| r.len())
}

/// Read file and convert to UTF-8 if needed (Windows-1252 fallback for Excel exports).
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Render the grid as comma-separated text.
///
/// Numbers use their shortest decimal form, booleans `true`/`false`, null an
/// empty field. Fields are quoted only when they need it.
pub fn serialize(grid: &Grid) -> Result<String, IoError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    for row in grid.rows() {
        writer.write_record(row.iter().map(Cell::display))?;
    }
    let bytes = writer.into_inner().map_err(|e| IoError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| IoError::Io(e.to_string()))
}

pub fn export_to_path(grid: &Grid, path: &Path) -> Result<(), IoError> {
    let text = serialize(grid)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_each_candidate() {
        let cases: [(&str, u8); 4] = [
            ("sku;qty\nA-1;4\nB-2;0\n", b';'),
            ("sku,qty\nA-1,4\nB-2,0\n", b','),
            ("sku\tqty\nA-1\t4\nB-2\t0\n", b'\t'),
            ("sku|qty\nA-1|4\nB-2|0\n", b'|'),
        ];
        for (content, expected) in cases {
            assert_eq!(sniff_delimiter(content), expected, "{:?}", content);
        }
    }

    #[test]
    fn test_sniff_ignores_quoted_commas() {
        let content = "city;note\nParis;\"wet, cold\"\nOslo;\"snow, dark\"\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_skips_blank_leading_lines() {
        assert_eq!(sniff_delimiter("\n\nid|qty\n1|2\n"), b'|');
        assert_eq!(sniff_delimiter("\r\n\r\nid;qty\r\n1;2\r\n"), b';');

        let out = parse(b"\n\nid;qty\n1;2\n").unwrap();
        assert_eq!(out.delimiter, b';');
        assert_eq!(out.grid.row_count(), 2);
        assert_eq!(out.grid.get(1, 1), Some(&Cell::Number(2.0)));
    }

    #[test]
    fn test_sniff_single_column_falls_back_to_comma() {
        assert_eq!(sniff_delimiter("a\nb\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_parse_dynamic_typing() {
        let out = parse(b"name,n,flag,empty\nx,1.5,TRUE,\ny,-2,false,z\n").unwrap();
        let g = out.grid;
        assert_eq!(g.row_count(), 3);
        // First line is data, not a header
        assert_eq!(g.get(0, 0), Some(&Cell::Text("name".into())));
        assert_eq!(g.get(1, 1), Some(&Cell::Number(1.5)));
        assert_eq!(g.get(1, 2), Some(&Cell::Bool(true)));
        assert_eq!(g.get(1, 3), Some(&Cell::Null));
        assert_eq!(g.get(2, 1), Some(&Cell::Number(-2.0)));
        assert_eq!(g.get(2, 2), Some(&Cell::Bool(false)));
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_parse_keeps_non_finite_as_text() {
        let g = parse(b"NaN,inf,True\n").unwrap().grid;
        assert_eq!(g.get(0, 0), Some(&Cell::Text("NaN".into())));
        assert_eq!(g.get(0, 1), Some(&Cell::Text("inf".into())));
        assert_eq!(g.get(0, 2), Some(&Cell::Text("True".into())));
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let g = parse(b"a,b\n\n\nc,d\n").unwrap().grid;
        assert_eq!(g.row_count(), 2);
        assert_eq!(g.get(1, 0), Some(&Cell::Text("c".into())));
    }

    #[test]
    fn test_parse_pads_ragged_rows() {
        let out = parse(b"a,b,c\nd\ne,f,g\n").unwrap();
        assert!(out.grid.is_rectangular());
        assert_eq!(out.grid.column_count(), 3);
        assert_eq!(out.grid.get(1, 2), Some(&Cell::Null));
        assert_eq!(out.issues, vec![ParseIssue { line: 2, row: 1, expected: 3, found: 1 }]);
    }

    #[test]
    fn test_parse_empty_input() {
        let out = parse(b"").unwrap();
        assert!(out.grid.is_empty());
    }

    #[test]
    fn test_parse_windows_1252_fallback() {
        // "café" with é as 0xE9
        let out = parse(b"caf\xe9,1\n").unwrap();
        assert_eq!(out.grid.get(0, 0), Some(&Cell::Text("café".into())));
    }

    #[test]
    fn test_parse_strips_bom() {
        let out = parse("\u{feff}a,b\n".as_bytes()).unwrap();
        assert_eq!(out.grid.get(0, 0), Some(&Cell::Text("a".into())));
    }

    #[test]
    fn test_serialize_quotes_and_types() {
        let g = Grid::from_rows(vec![
            vec![Cell::Text("a,b".into()), Cell::Number(10.0), Cell::Null],
            vec![Cell::Text("say \"hi\"".into()), Cell::Bool(true), Cell::Number(1.5)],
        ])
        .unwrap();
        assert_eq!(serialize(&g).unwrap(), "\"a,b\",10,\n\"say \"\"hi\"\"\",true,1.5\n");
    }

    #[test]
    fn test_serialize_then_parse_keeps_values() {
        let g = Grid::from_rows(vec![
            vec![Cell::Text("line\nbreak".into()), Cell::Number(-0.25)],
            vec![Cell::Bool(false), Cell::Null],
        ])
        .unwrap();
        let back = parse(serialize(&g).unwrap().as_bytes()).unwrap().grid;
        assert_eq!(back, g);
    }

    #[test]
    fn test_semicolon_csv_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.csv");
        fs::write(&path, "Name;Age;City\nAlice;30;Paris\nBob;25;London\n").unwrap();

        let out = import(&path).unwrap();
        assert_eq!(out.delimiter, b';');
        assert_eq!(out.grid.get(0, 2), Some(&Cell::Text("City".into())));
        assert_eq!(out.grid.get(1, 1), Some(&Cell::Number(30.0)));
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let g = Grid::from_rows(vec![vec![Cell::from("x"), Cell::Number(2.0)]]).unwrap();
        export_to_path(&g, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x,2\n");
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let err = import(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
