use std::fmt;

/// The two kinds of field a line is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A maximal run of ASCII digits.
    Numeric,
    /// A maximal run of anything else.
    Literal,
}

/// A typed slice of a line.
///
/// Numeric fields keep their exact text, so `007` and `7` are different fields
/// even though they carry the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field<'a> {
    pub kind: FieldKind,
    pub text: &'a str,
}

impl<'a> Field<'a> {
    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Numeric
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Iterator over the fields of a line, left to right.
///
/// Each step strips the longest prefix of the remaining text that is all digits
/// or all non-digits, so two adjacent fields never share a kind.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Fields<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.as_bytes().first()?;
        let numeric = first.is_ascii_digit();

        // ASCII digits are single bytes, so a boundary found this way is
        // always a char boundary as well.
        let end = self
            .rest
            .bytes()
            .position(|b| b.is_ascii_digit() != numeric)
            .unwrap_or(self.rest.len());

        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;

        let kind = if numeric {
            FieldKind::Numeric
        } else {
            FieldKind::Literal
        };
        Some(Field { kind, text })
    }
}

impl std::iter::FusedIterator for Fields<'_> {}

/// Lazily splits `line` into fields.
pub fn fields(line: &str) -> Fields<'_> {
    Fields { rest: line }
}

/// Splits `line` into its full field sequence.
///
/// Concatenating the returned texts gives back `line`. An empty line has no
/// fields.
pub fn decompose(line: &str) -> Vec<Field<'_>> {
    fields(line).collect()
}

/// Position of one field inside an owned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    kind: FieldKind,
    start: usize,
    end: usize,
}

/// An owned line together with its field layout.
///
/// Lets a line be decomposed once and compared against both of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedLine {
    text: String,
    spans: Vec<Span>,
}

impl DecomposedLine {
    pub fn new(text: String) -> Self {
        let mut start = 0;
        let spans = fields(&text)
            .map(|field| {
                let end = start + field.text.len();
                let span = Span {
                    kind: field.kind,
                    start,
                    end,
                };
                start = end;
                span
            })
            .collect();

        Self { text, spans }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of fields in the line.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = Field<'_>> + Clone + '_ {
        self.spans.iter().map(move |span| Field {
            kind: span.kind,
            text: &self.text[span.start..span.end],
        })
    }
}

impl From<String> for DecomposedLine {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for DecomposedLine {
    fn from(text: &str) -> Self {
        Self::new(text.to_owned())
    }
}
