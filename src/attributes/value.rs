//! Tagged attribute values and best-effort literal parsing.

use std::fmt;

/// A scalar or sequence attribute value.
///
/// Equality is structural: `Int(5)` and `Float(5.0)` are different values.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Sequence(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Returns the value as `f64` when it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text when the value is [`AttributeValue::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    fn write_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            // Debug keeps the decimal point, so `7.0` does not read back as an int.
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Text(s) => f.write_str(s),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_nested(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        Self::Sequence(value)
    }
}

/// Parses `input` into its most specific value.
///
/// Recognizes integers in the `i64` range, floats, booleans (`True`/`true`,
/// `False`/`false`), quoted strings, and tuples or lists of those. Anything
/// else, including partially valid literals, becomes [`AttributeValue::Text`] holding the
/// input unchanged.
#[must_use]
pub fn parse_literal(input: &str) -> AttributeValue {
    let mut parser = LiteralParser::new(input.trim());
    match parser.value() {
        Some(value) if parser.at_end() => value,
        _ => AttributeValue::Text(input.to_owned()),
    }
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos == self.src.len()
    }

    fn value(&mut self) -> Option<AttributeValue> {
        self.skip_ws();
        match self.peek()? {
            '(' => self.sequence(')'),
            '[' => self.sequence(']'),
            '\'' | '"' => self.quoted().map(AttributeValue::Text),
            c if c.is_ascii_alphabetic() => self.word(),
            _ => self.number(),
        }
    }

    fn word(&mut self) -> Option<AttributeValue> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Some(AttributeValue::Bool(true)),
            "False" | "false" => Some(AttributeValue::Bool(false)),
            _ => None,
        }
    }

    fn number(&mut self) -> Option<AttributeValue> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        {
            self.bump();
        }
        let token = &self.src[start..self.pos];
        if !token.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        if !token.contains(['.', 'e', 'E']) {
            // Integers outside the i64 range stay text rather than losing digits.
            return token.parse::<i64>().ok().map(AttributeValue::Int);
        }
        token.parse::<f64>().ok().map(AttributeValue::Float)
    }

    fn quoted(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    other => out.push(other),
                },
                c if c == quote => return Some(out),
                c => out.push(c),
            }
        }
    }

    fn sequence(&mut self, close: char) -> Option<AttributeValue> {
        self.bump();
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_ws();
            if self.peek()? == close {
                self.bump();
                break;
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.bump()? {
                ',' => trailing_comma = true,
                c if c == close => {
                    trailing_comma = false;
                    break;
                }
                _ => return None,
            }
        }
        // `(x)` is a parenthesized value, `(x,)` a one-element tuple.
        if close == ')' && items.len() == 1 && !trailing_comma {
            return items.pop();
        }
        Some(AttributeValue::Sequence(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers() {
        assert_eq!(parse_literal("7"), AttributeValue::Int(7));
        assert_eq!(parse_literal(" -12 "), AttributeValue::Int(-12));
        assert_eq!(parse_literal("9223372036854775807"), AttributeValue::Int(i64::MAX));
    }

    #[test]
    fn oversized_integers_stay_raw() {
        for raw in ["99999999999999999999", "-9223372036854775809", "[1, 99999999999999999999]"] {
            assert_eq!(parse_literal(raw), AttributeValue::Text(raw.into()), "{raw:?}");
        }
        assert_eq!(parse_literal("1e20"), AttributeValue::Float(1e20));
    }

    #[test]
    fn parses_floats() {
        assert_eq!(parse_literal("0.5"), AttributeValue::Float(0.5));
        assert_eq!(parse_literal("1e-3"), AttributeValue::Float(1e-3));
        assert_eq!(parse_literal("-2.5"), AttributeValue::Float(-2.5));
    }

    #[test]
    fn parses_booleans() {
        assert_eq!(parse_literal("True"), AttributeValue::Bool(true));
        assert_eq!(parse_literal("false"), AttributeValue::Bool(false));
    }

    #[test]
    fn parses_sequences() {
        assert_eq!(
            parse_literal("(1, 2.5, 'a')"),
            AttributeValue::Sequence(vec![
                AttributeValue::Int(1),
                AttributeValue::Float(2.5),
                AttributeValue::Text("a".into()),
            ])
        );
        assert_eq!(
            parse_literal("[[1], []]"),
            AttributeValue::Sequence(vec![
                AttributeValue::Sequence(vec![AttributeValue::Int(1)]),
                AttributeValue::Sequence(vec![]),
            ])
        );
        assert_eq!(
            parse_literal("(3,)"),
            AttributeValue::Sequence(vec![AttributeValue::Int(3)])
        );
        assert_eq!(parse_literal("(3)"), AttributeValue::Int(3));
    }

    #[test]
    fn quoted_strings_lose_their_quotes() {
        assert_eq!(parse_literal("'it\\'s'"), AttributeValue::Text("it's".into()));
        assert_eq!(parse_literal("\"x\""), AttributeValue::Text("x".into()));
    }

    #[test]
    fn unrecognized_input_stays_raw() {
        for raw in ["green", "-", "", "None", "inf", "1 2", "[1, green]", "(1", "1.2.3"] {
            assert_eq!(parse_literal(raw), AttributeValue::Text(raw.into()), "{raw:?}");
        }
    }

    #[test]
    fn display_reads_back() {
        let values = [
            AttributeValue::Int(-4),
            AttributeValue::Float(7.0),
            AttributeValue::Float(0.1),
            AttributeValue::Bool(true),
            AttributeValue::Text("red".into()),
            AttributeValue::Sequence(vec![
                AttributeValue::Int(255),
                AttributeValue::Text("o'k".into()),
                AttributeValue::Bool(false),
            ]),
        ];
        for value in values {
            assert_eq!(parse_literal(&value.to_string()), value);
        }
    }

    #[test]
    fn numeric_accessor() {
        assert_eq!(AttributeValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(AttributeValue::Text("2".into()).as_f64(), None);
    }
}
