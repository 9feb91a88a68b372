//! Delimited-text record codec.
//!
//! # Responsibility
//! - Encode an ordered list of string fields as one line of a table file.
//! - Decode table files back into records, one record per call.
//!
//! # Invariants
//! - `decode(encode(fields)) == fields` for any field values, including ones
//!   containing commas, quotes, CR or LF.
//! - Malformed input never aborts decoding; it is logged and counted.
//! - Field-count checks belong to callers, not to this module.

use log::warn;
use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

const QUOTE: char = '"';
const DELIMITER: char = ',';
const TERMINATOR: char = '\n';

/// Quotes one field for writing.
///
/// Every quote is doubled, and the result is wrapped in quotes when it
/// contains a quote, a comma, CR or LF. Other values are returned unchanged.
pub fn quote_field(field: &str) -> Cow<'_, str> {
    if !field.contains([QUOTE, DELIMITER, '\n', '\r']) {
        return Cow::Borrowed(field);
    }
    let escaped = field.replace(QUOTE, "\"\"");
    Cow::Owned(format!("{QUOTE}{escaped}{QUOTE}"))
}

/// Encodes fields as one record line, including the trailing line break.
pub fn encode_record<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            line.push(DELIMITER);
        }
        line.push_str(&quote_field(field.as_ref()));
    }
    line.push(TERMINATOR);
    line
}

/// Decodes the first record of `input`.
///
/// Returns an empty list when `input` holds no record at all.
pub fn decode_record(input: &str) -> Vec<String> {
    RecordReader::new(input).next_record().unwrap_or_default()
}

/// Streaming decoder over the full text of a table file.
///
/// Yields records in file order. Iteration ends at end of input when no
/// field content is pending.
pub struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    records_read: usize,
    malformed: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            records_read: 0,
            malformed: 0,
        }
    }

    /// Number of malformed-input events seen so far.
    pub fn malformed_count(&self) -> usize {
        self.malformed
    }

    /// Reads the next record, or `None` at end of input.
    pub fn next_record(&mut self) -> Option<Vec<String>> {
        let mut fields = Vec::new();
        let mut buffer = String::new();
        let mut in_quotes = false;
        // Tracks whether the current field has consumed any character, so an
        // opening quote can be told apart from an escaped one.
        let mut field_started = false;

        loop {
            let Some(ch) = self.chars.next() else {
                if in_quotes {
                    self.report("unterminated quoted field");
                }
                if fields.is_empty() && !field_started {
                    return None;
                }
                fields.push(buffer);
                return Some(self.finish(fields));
            };

            match ch {
                QUOTE if !in_quotes && !field_started => {
                    in_quotes = true;
                    field_started = true;
                }
                QUOTE => match self.chars.peek() {
                    None => {
                        if !in_quotes {
                            self.report("stray quote at end of input");
                        }
                        fields.push(buffer);
                        return Some(self.finish(fields));
                    }
                    Some(&QUOTE) => {
                        self.chars.next();
                        if !in_quotes {
                            self.report("doubled quote outside quoted field");
                        }
                        buffer.push(QUOTE);
                    }
                    Some(_) => in_quotes = !in_quotes,
                },
                DELIMITER if !in_quotes => {
                    fields.push(std::mem::take(&mut buffer));
                    field_started = false;
                }
                '\n' | '\r' if !in_quotes => {
                    if ch == '\r' && self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    fields.push(buffer);
                    return Some(self.finish(fields));
                }
                other => {
                    field_started = true;
                    buffer.push(other);
                }
            }
        }
    }

    fn finish(&mut self, fields: Vec<String>) -> Vec<String> {
        self.records_read += 1;
        fields
    }

    fn report(&mut self, reason: &str) {
        self.malformed += 1;
        warn!(
            "event=record_malformed module=codec record={} reason=\"{}\"",
            self.records_read, reason
        );
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_record, encode_record, quote_field, RecordReader};

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(quote_field("Jane Austen"), "Jane Austen");
        assert_eq!(quote_field(""), "");
    }

    #[test]
    fn special_characters_force_quoting() {
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(quote_field("cr\r"), "\"cr\r\"");
    }

    #[test]
    fn encode_joins_with_commas_and_terminates_line() {
        assert_eq!(encode_record(["0", "Jane Austen"]), "0,Jane Austen\n");
        assert_eq!(encode_record(["1", "", "x,y"]), "1,,\"x,y\"\n");
    }

    #[test]
    fn decode_handles_escaped_and_embedded_delimiters() {
        let decoded = decode_record("3,\"Verne, Jules\",\"the \"\"Nautilus\"\"\"\n");
        assert_eq!(decoded, fields(&["3", "Verne, Jules", "the \"Nautilus\""]));
    }

    #[test]
    fn single_quote_field_round_trips() {
        let line = encode_record(["\""]);
        assert_eq!(line, "\"\"\"\"\n");
        assert_eq!(decode_record(&line), fields(&["\""]));
    }

    #[test]
    fn quoted_newlines_stay_inside_the_field() {
        let mut reader = RecordReader::new("1,\"a\nb\"\n2,c\n");
        assert_eq!(reader.next_record(), Some(fields(&["1", "a\nb"])));
        assert_eq!(reader.next_record(), Some(fields(&["2", "c"])));
        assert_eq!(reader.next_record(), None);
    }

    #[test]
    fn crlf_is_a_single_terminator() {
        let records: Vec<_> = RecordReader::new("1,a\r\n2,b\r\n").collect();
        assert_eq!(records, vec![fields(&["1", "a"]), fields(&["2", "b"])]);
    }

    #[test]
    fn missing_final_terminator_flushes_partial_record() {
        let records: Vec<_> = RecordReader::new("1,a\n2,b").collect();
        assert_eq!(records, vec![fields(&["1", "a"]), fields(&["2", "b"])]);
    }

    #[test]
    fn trailing_delimiter_yields_empty_last_field() {
        assert_eq!(decode_record("1,a,\n"), fields(&["1", "a", ""]));
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(decode_record("").is_empty());
        assert_eq!(RecordReader::new("").count(), 0);
    }

    #[test]
    fn stray_quote_at_end_is_reported_but_tolerated() {
        let mut reader = RecordReader::new("1,ab\"");
        assert_eq!(reader.next_record(), Some(fields(&["1", "ab"])));
        assert_eq!(reader.malformed_count(), 1);
        assert_eq!(reader.next_record(), None);
    }

    #[test]
    fn doubled_quote_outside_quotes_is_reported() {
        let mut reader = RecordReader::new("1,a\"\"b\n");
        assert_eq!(reader.next_record(), Some(fields(&["1", "a\"b"])));
        assert_eq!(reader.malformed_count(), 1);
    }

    #[test]
    fn well_formed_input_reports_nothing() {
        let input = encode_record(["1", "\"quoted\"", "a,b", "multi\nline"]);
        let mut reader = RecordReader::new(&input);
        reader.next_record();
        assert_eq!(reader.malformed_count(), 0);
    }
}
