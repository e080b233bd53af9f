//! RFC4180 tokenizer.
//!
//! Never fails: malformed quoting simply runs to the end of input, and
//! content validation is left to the importer.

const BOM: char = '\u{FEFF}';

/// Split `text` into rows of fields.
///
/// - `,` separates fields; `\n`, `\r\n` and a lone `\r` end a row.
/// - Quoted fields may contain separators and line breaks; `""` inside
///   quotes decodes to a single `"`.
/// - A leading byte-order mark is ignored.
/// - The empty row produced by a trailing newline is dropped.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    row.push(field);
    rows.push(row);

    if rows.last().is_some_and(|r| r.len() == 1 && r[0].is_empty()) {
        rows.pop();
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trailing_newline_does_not_add_a_row() {
        assert_eq!(tokenize("x,y\n"), vec![row(&["x", "y"])]);
        assert_eq!(tokenize("x,y"), vec![row(&["x", "y"])]);
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\u{FEFF}").is_empty());
    }

    #[test]
    fn crlf_and_lone_cr_end_rows() {
        assert_eq!(
            tokenize("a,b\r\nc,d\re,f\n"),
            vec![row(&["a", "b"]), row(&["c", "d"]), row(&["e", "f"])]
        );
    }

    #[test]
    fn quoted_fields_keep_separators_and_breaks() {
        let rows = tokenize("\"a,b\",\"line1\nline2\",\"x\r\ny\"\n");
        assert_eq!(rows, vec![row(&["a,b", "line1\nline2", "x\r\ny"])]);
    }

    #[test]
    fn doubled_quotes_decode_to_one() {
        let rows = tokenize("\"sore, red, \"\"ouch\"\"\"\n");
        assert_eq!(rows, vec![row(&["sore, red, \"ouch\""])]);
    }

    #[test]
    fn empty_fields_are_preserved() {
        assert_eq!(tokenize(",,\n"), vec![row(&["", "", ""])]);
        assert_eq!(
            tokenize("2024-01-15T10:30:00Z,Buttock,,\n"),
            vec![row(&["2024-01-15T10:30:00Z", "Buttock", "", ""])]
        );
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(
            tokenize("\u{FEFF}date,location\n"),
            vec![row(&["date", "location"])]
        );
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_input() {
        assert_eq!(tokenize("a,\"open,still\nopen"), vec![row(&["a", "open,still\nopen"])]);
    }

    #[test]
    fn blank_line_in_the_middle_is_a_single_empty_field() {
        assert_eq!(
            tokenize("a\n\nb\n"),
            vec![row(&["a"]), row(&[""]), row(&["b"])]
        );
    }
}
