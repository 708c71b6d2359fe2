//! A reader for the comma-separated table format that describes a VFS.
//!
//! The dialect is the conventional one: `,` separates fields, `"` quotes them,
//! a doubled `""` inside a quoted field stands for one quote, and quoted fields
//! may span line breaks. Records end at `\n`, `\r\n` or `\r`; an empty line is a
//! record with no fields. A quoted field still open at the end of the input
//! takes everything up to there, line breaks included.

/// One row of the table together with the line it starts on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadingState {
    /// At the beginning of a record, nothing read yet.
    RecordStart,
    /// Right after a delimiter.
    FieldStart,
    Unquoted,
    Quoted,
    /// Saw a `"` while inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
}

struct TableFSM<'a> {
    input: std::iter::Peekable<std::str::Chars<'a>>,
    state: ReadingState,
    line: usize,
    record_line: usize,
    fields: Vec<String>,
    buffer: String,
}

impl<'a> TableFSM<'a> {
    fn new(text: &'a str) -> Self {
        TableFSM {
            input: text.chars().peekable(),
            state: ReadingState::RecordStart,
            line: 1,
            record_line: 1,
            fields: Vec::new(),
            buffer: String::new(),
        }
    }

    fn make_records(&mut self) -> Vec<Record> {
        let mut out = Vec::new();

        while let Some(ch) = self.input.next() {
            match self.state {
                ReadingState::RecordStart => self.handle_record_start(ch, &mut out),
                ReadingState::FieldStart => self.handle_field_start(ch, &mut out),
                ReadingState::Unquoted => self.handle_unquoted(ch, &mut out),
                ReadingState::Quoted => self.handle_quoted(ch),
                ReadingState::QuoteInQuoted => self.handle_quote_in_quoted(ch, &mut out),
            }
        }

        if self.state != ReadingState::RecordStart {
            self.finish_record(&mut out);
        }

        out
    }

    fn handle_record_start(&mut self, ch: char, out: &mut Vec<Record>) {
        self.record_line = self.line;
        if self.is_line_break(ch) {
            // An empty line is a record without fields.
            out.push(Record {
                line: self.record_line,
                fields: Vec::new(),
            });
            return;
        }
        self.handle_field_start(ch, out);
    }

    fn handle_field_start(&mut self, ch: char, out: &mut Vec<Record>) {
        match ch {
            '"' => self.state = ReadingState::Quoted,
            ',' => {
                self.finish_field();
                self.state = ReadingState::FieldStart;
            }
            c if self.is_line_break(c) => self.finish_record(out),
            c => {
                self.buffer.push(c);
                self.state = ReadingState::Unquoted;
            }
        }
    }

    fn handle_unquoted(&mut self, ch: char, out: &mut Vec<Record>) {
        match ch {
            ',' => {
                self.finish_field();
                self.state = ReadingState::FieldStart;
            }
            c if self.is_line_break(c) => self.finish_record(out),
            c => self.buffer.push(c),
        }
    }

    fn handle_quoted(&mut self, ch: char) {
        match ch {
            '"' => self.state = ReadingState::QuoteInQuoted,
            '\n' => {
                self.line += 1;
                self.buffer.push(ch);
            }
            '\r' => {
                if self.input.peek() != Some(&'\n') {
                    self.line += 1;
                }
                self.buffer.push(ch);
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_quote_in_quoted(&mut self, ch: char, out: &mut Vec<Record>) {
        match ch {
            '"' => {
                self.buffer.push('"');
                self.state = ReadingState::Quoted;
            }
            ',' => {
                self.finish_field();
                self.state = ReadingState::FieldStart;
            }
            c if self.is_line_break(c) => self.finish_record(out),
            // Text after the closing quote is kept as part of the field.
            c => {
                self.buffer.push(c);
                self.state = ReadingState::Unquoted;
            }
        }
    }

    /// Returns true for a record terminator, swallowing the `\n` of `\r\n`.
    fn is_line_break(&mut self, ch: char) -> bool {
        match ch {
            '\n' => {
                self.line += 1;
                true
            }
            '\r' => {
                self.input.next_if_eq(&'\n');
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    fn finish_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.buffer));
    }

    fn finish_record(&mut self, out: &mut Vec<Record>) {
        self.finish_field();
        out.push(Record {
            line: self.record_line,
            fields: std::mem::take(&mut self.fields),
        });
        self.state = ReadingState::RecordStart;
    }
}

/// Split table text into records.
pub fn read_records(text: &str) -> Vec<Record> {
    let mut reader = TableFSM::new(text);
    reader.make_records()
}
