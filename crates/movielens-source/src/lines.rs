//! Data-line iteration over a CSV input.

use crate::error::ImportError;
use std::io::BufRead;

/// Iterator over the data rows of an input, yielding `(line_number, line)`.
///
/// Line numbers are 1-based physical lines, so the first data row after a
/// header is line 2. A trailing `\r` is stripped. Blank lines are yielded
/// like any other row, so they fail to parse instead of vanishing.
pub(crate) struct DataLines<'a, R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    skip_header: bool,
    source_name: &'a str,
}

impl<'a, R: BufRead> DataLines<'a, R> {
    pub(crate) fn new(reader: R, source_name: &'a str, skip_header: bool) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            skip_header,
            source_name,
        }
    }
}

impl<R: BufRead> Iterator for DataLines<'_, R> {
    type Item = Result<(usize, String), ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(ImportError::Io {
                        source_name: self.source_name.to_string(),
                        source,
                    }))
                }
            };
            self.line_no += 1;

            if self.line_no == 1 && self.skip_header {
                continue;
            }

            let mut line = line;
            if line.ends_with('\r') {
                line.pop();
            }
            if self.line_no == 1 && line.starts_with('\u{feff}') {
                line.remove(0);
            }

            return Some(Ok((self.line_no, line)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str, skip_header: bool) -> Vec<(usize, String)> {
        DataLines::new(Cursor::new(input), "test.csv", skip_header)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_skips_header() {
        let rows = collect("movieId,title,genres\n1,A,Drama\n2,B,War\n", true);
        assert_eq!(
            rows,
            vec![(2, "1,A,Drama".to_string()), (3, "2,B,War".to_string())]
        );
    }

    #[test]
    fn test_keeps_first_line_without_header() {
        let rows = collect("\u{feff}1,A,Drama\n", false);
        assert_eq!(rows, vec![(1, "1,A,Drama".to_string())]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let rows = collect("h\r\n1,A,Drama\r\n\r\n3,C,War", true);
        assert_eq!(
            rows,
            vec![
                (2, "1,A,Drama".to_string()),
                (3, String::new()),
                (4, "3,C,War".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_and_header_only_inputs() {
        assert!(collect("", true).is_empty());
        assert!(collect("userId,movieId,rating,timestamp\n", true).is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_io_error() {
        let input: &[u8] = b"h\n1,\xff\xfe,Drama\n";
        let result: Result<Vec<_>, _> = DataLines::new(input, "bad.csv", true).collect();
        assert!(matches!(result, Err(ImportError::Io { source_name, .. }) if source_name == "bad.csv"));
    }
}
