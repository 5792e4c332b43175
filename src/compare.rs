use crate::field::{decompose, DecomposedLine, Field};
use tracing::trace;

/// How the second of two lines (or fields) relates to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Identical.
    Equal,
    /// Exactly one numeric field went up by one.
    Increment,
    /// Exactly one numeric field went down by one.
    Decrement,
    /// Anything else.
    Unrelated,
}

/// Classifies two fields found at the same position of two lines.
///
/// Numeric fields are compared by value with leading zeros ignored, so
/// `0099` to `100` is an increment. Values of any length are supported.
pub fn compare_fields(a: &Field<'_>, b: &Field<'_>) -> Comparison {
    if a == b {
        return Comparison::Equal;
    }
    if !(a.is_numeric() && b.is_numeric()) {
        return Comparison::Unrelated;
    }

    let a = strip_zeros(a.text);
    let b = strip_zeros(b.text);
    if is_successor(a, b) {
        Comparison::Increment
    } else if is_successor(b, a) {
        Comparison::Decrement
    } else {
        Comparison::Unrelated
    }
}

/// Compares two lines field by field.
pub fn compare_lines(a: &str, b: &str) -> Comparison {
    compare_decomposed(&decompose(a), &decompose(b))
}

/// Compares two already decomposed lines.
///
/// Fields are paired by position; when the counts differ, the extra trailing
/// fields of the longer line are ignored. Such a pair can still be an
/// increment or decrement, but never `Equal`. A line with no fields is
/// unrelated to everything.
pub fn compare_decomposed(a: &[Field<'_>], b: &[Field<'_>]) -> Comparison {
    classify(a.iter().copied(), b.iter().copied())
}

impl DecomposedLine {
    /// Compares this line against the one that follows it.
    pub fn compare(&self, next: &DecomposedLine) -> Comparison {
        classify(self.fields(), next.fields())
    }
}

fn classify<'a, 'b, A, B>(a: A, b: B) -> Comparison
where
    A: ExactSizeIterator<Item = Field<'a>> + Clone,
    B: ExactSizeIterator<Item = Field<'b>> + Clone,
{
    if a.len() == 0 || b.len() == 0 {
        return Comparison::Unrelated;
    }
    if a.len() == b.len() && a.clone().zip(b.clone()).all(|(fa, fb)| fa == fb) {
        return Comparison::Equal;
    }

    let mut increments = 0usize;
    let mut decrements = 0usize;
    for (fa, fb) in a.zip(b) {
        match compare_fields(&fa, &fb) {
            Comparison::Increment => increments += 1,
            Comparison::Decrement => decrements += 1,
            Comparison::Equal | Comparison::Unrelated => {}
        }
    }

    let result = match (increments, decrements) {
        (1, 0) => Comparison::Increment,
        (0, 1) => Comparison::Decrement,
        _ => Comparison::Unrelated,
    };
    trace!(increments, decrements, ?result, "compared lines");
    result
}

fn strip_zeros(digits: &str) -> &str {
    digits.trim_start_matches('0')
}

/// Returns true when `hi` is the decimal successor of `lo`.
///
/// Both arguments are digit strings without leading zeros (zero itself is the
/// empty string).
fn is_successor(lo: &str, hi: &str) -> bool {
    let lo = lo.as_bytes();
    let hi = hi.as_bytes();
    let nines = lo.iter().rev().take_while(|&&d| d == b'9').count();

    if nines == lo.len() {
        // 999 + 1 = 1000, and 0 + 1 = 1
        return hi.len() == nines + 1 && hi[0] == b'1' && hi[1..].iter().all(|&d| d == b'0');
    }
    if hi.len() != lo.len() {
        return false;
    }

    let pivot = lo.len() - nines - 1;
    lo[..pivot] == hi[..pivot]
        && hi[pivot] == lo[pivot] + 1
        && hi[pivot + 1..].iter().all(|&d| d == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn num(text: &str) -> Field<'_> {
        Field {
            kind: FieldKind::Numeric,
            text,
        }
    }

    fn lit(text: &str) -> Field<'_> {
        Field {
            kind: FieldKind::Literal,
            text,
        }
    }

    #[test]
    fn test_compare_fields() {
        assert_eq!(compare_fields(&num("00345"), &num("00346")), Comparison::Increment);
        assert_eq!(compare_fields(&num("00346"), &num("00345")), Comparison::Decrement);
        assert_eq!(compare_fields(&num("12"), &num("12")), Comparison::Equal);
        assert_eq!(compare_fields(&num("12"), &num("14")), Comparison::Unrelated);
        assert_eq!(compare_fields(&lit("a"), &lit("b")), Comparison::Unrelated);
        assert_eq!(compare_fields(&lit("1"), &num("1")), Comparison::Unrelated);
    }

    #[test]
    fn test_padding_is_not_equality() {
        assert_eq!(compare_fields(&num("007"), &num("7")), Comparison::Unrelated);
        assert_eq!(compare_fields(&num("0"), &num("00")), Comparison::Unrelated);
    }

    #[test]
    fn test_carry_across_width() {
        assert_eq!(compare_fields(&num("0099"), &num("0100")), Comparison::Increment);
        assert_eq!(compare_fields(&num("99"), &num("100")), Comparison::Increment);
        assert_eq!(compare_fields(&num("100"), &num("99")), Comparison::Decrement);
        assert_eq!(compare_fields(&num("0"), &num("1")), Comparison::Increment);
        assert_eq!(compare_fields(&num("000"), &num("001")), Comparison::Increment);
        assert_eq!(compare_fields(&num("199"), &num("200")), Comparison::Increment);
        assert_eq!(compare_fields(&num("199"), &num("201")), Comparison::Unrelated);
        assert_eq!(compare_fields(&num("99"), &num("1001")), Comparison::Unrelated);
    }

    #[test]
    fn test_values_beyond_u128() {
        let lo = "340282366920938463463374607431768211455999";
        let hi = "340282366920938463463374607431768211456000";
        assert_eq!(compare_fields(&num(lo), &num(hi)), Comparison::Increment);
        assert_eq!(compare_fields(&num(hi), &num(lo)), Comparison::Decrement);
    }

    #[test]
    fn test_compare_lines() {
        assert_eq!(
            compare_lines("my_line2439_3349.png", "my_line2439_3350.png"),
            Comparison::Increment
        );
        assert_eq!(
            compare_lines("my_line2439_3349.png", "my_line2439_3348.png"),
            Comparison::Decrement
        );
        assert_eq!(
            compare_lines("my_line2439_3349.png", "my_line2439_8304.png"),
            Comparison::Unrelated
        );
        assert_eq!(
            compare_lines("my_line2439_3349.png", "spam_8304.png"),
            Comparison::Unrelated
        );
        assert_eq!(
            compare_lines("my_line2439_3349.png", "my_line2439_3349.png"),
            Comparison::Equal
        );
    }

    #[test]
    fn test_two_fields_changed() {
        assert_eq!(compare_lines("a1b1", "a2b2"), Comparison::Unrelated);
        assert_eq!(compare_lines("a1b2", "a2b1"), Comparison::Unrelated);
        assert_eq!(compare_lines("a2b2", "a1b1"), Comparison::Unrelated);
    }

    #[test]
    fn test_other_field_differs() {
        // One field steps but a literal field also differs
        assert_eq!(compare_lines("cam1-f1.png", "cam1-f2.jpg"), Comparison::Increment);
        assert_eq!(compare_lines("cam1-f1.png", "cam2-f1.png"), Comparison::Increment);
        assert_eq!(compare_lines("camA-f1.png", "camB-f2.png"), Comparison::Increment);
    }

    #[test]
    fn test_uneven_field_counts() {
        assert_eq!(compare_lines("f1", "f1.png"), Comparison::Unrelated);
        assert_eq!(compare_lines("f1", "f2.png"), Comparison::Increment);
        assert_eq!(compare_lines("f2.png", "f1"), Comparison::Decrement);
    }

    #[test]
    fn test_empty_lines_unrelated() {
        assert_eq!(compare_lines("", ""), Comparison::Unrelated);
        assert_eq!(compare_lines("", "a"), Comparison::Unrelated);
        assert_eq!(compare_lines("1", ""), Comparison::Unrelated);
    }

    #[test]
    fn test_decomposed_line_compare_agrees() {
        let pairs = [
            ("f0001.png", "f0002.png"),
            ("f0002.png", "f0001.png"),
            ("f0001.png", "f0001.png"),
            ("f0001.png", "g0002.png"),
            ("f1", "f2.png"),
        ];
        for (a, b) in pairs {
            let da = DecomposedLine::from(a);
            let db = DecomposedLine::from(b);
            assert_eq!(da.compare(&db), compare_lines(a, b), "{a} vs {b}");
        }
    }
}
