//! Recursive descent parser for SCIM paths and filters (RFC 7644 Section 3.4.2.2).
//!
//! Precedence from loosest to tightest: `or`, `and`, `not`/grouping, attribute
//! expressions. Keywords and operators are case-insensitive.

use super::path::{Path, is_namespace};
use super::{CompareOp, Filter};
use crate::error::{ScimError, ScimResult};
use serde_json::Value;

/// Parse a path expression.
pub(crate) fn parse_path(expression: &str) -> ScimResult<Path> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Ok(Path::root());
    }

    if !is_namespace(trimmed) {
        return parse_elements(trimmed, Path::root());
    }

    // The namespace ends at the last ':' before any value filter.
    let head = match trimmed.find('[') {
        Some(bracket) => &trimmed[..bracket],
        None => trimmed,
    };
    let split = head.rfind(':').unwrap_or(0);
    let path = Path::with_namespace(&trimmed[..split])?;
    let attributes = &trimmed[split + 1..];
    if attributes.is_empty() {
        return Ok(path);
    }
    parse_elements(attributes, path)
}

/// Parse a filter expression.
pub(crate) fn parse_filter(expression: &str) -> ScimResult<Filter> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(ScimError::invalid_filter("Filter expression must not be empty"));
    }
    let mut scanner = Scanner::new(trimmed);
    let filter = scanner.expression()?;
    scanner.skip_whitespace();
    if let Some(c) = scanner.peek() {
        return Err(ScimError::invalid_filter(format!(
            "Unexpected character '{}' at position {} in filter '{}'",
            c, scanner.pos, trimmed
        )));
    }
    Ok(filter)
}

fn parse_elements(expression: &str, mut path: Path) -> ScimResult<Path> {
    let mut scanner = Scanner::new(expression);
    loop {
        let start = scanner.pos;
        let name = scanner.take_while(is_attribute_char);
        if name.is_empty() {
            return Err(match scanner.peek() {
                Some(c) => ScimError::invalid_path(format!(
                    "Unexpected character '{}' at position {} in path '{}'",
                    c, start, expression
                )),
                None => ScimError::invalid_path(format!(
                    "Expected attribute name at position {} in path '{}'",
                    start, expression
                )),
            });
        }

        let filter = if scanner.eat('[') {
            let filter = scanner.value_filter().map_err(|e| {
                ScimError::invalid_path(format!(
                    "Invalid value filter in path '{}': {}",
                    expression,
                    e.detail()
                ))
            })?;
            Some(filter)
        } else {
            None
        };
        path = path.attribute_with(name, filter);

        match scanner.peek() {
            None => return Ok(path),
            Some('.') => {
                scanner.bump();
                if scanner.at_end() {
                    return Err(ScimError::invalid_path(format!(
                        "Unexpected end of path '{}' after '.'",
                        expression
                    )));
                }
            }
            Some(c) => {
                return Err(ScimError::invalid_path(format!(
                    "Unexpected character '{}' at position {} in path '{}'",
                    c, scanner.pos, expression
                )));
            }
        }
    }
}

fn is_attribute_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '$'
}

fn is_filter_path_char(c: char) -> bool {
    is_attribute_char(c) || c == '.' || c == ':'
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if predicate(c)) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    /// Consume `keyword` if it is the next word, followed by whitespace or '('.
    fn keyword(&mut self, keyword: &str) -> bool {
        let saved = self.pos;
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        if rest.len() >= keyword.len()
            && rest.is_char_boundary(keyword.len())
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword)
        {
            let follow = rest[keyword.len()..].chars().next();
            if matches!(follow, Some(c) if c.is_whitespace() || c == '(') {
                self.pos += keyword.len();
                return true;
            }
        }
        self.pos = saved;
        false
    }

    fn unexpected_end(&self) -> ScimError {
        ScimError::invalid_filter(format!(
            "Unexpected end of filter string '{}'",
            self.input
        ))
    }

    /// Parse the body of `attr[...]`; consumes the closing bracket.
    fn value_filter(&mut self) -> ScimResult<Filter> {
        let filter = self.expression()?;
        self.skip_whitespace();
        if !self.eat(']') {
            return Err(match self.peek() {
                Some(c) => ScimError::invalid_filter(format!(
                    "Expected ']' but found '{}' at position {}",
                    c, self.pos
                )),
                None => self.unexpected_end(),
            });
        }
        Ok(filter)
    }

    fn expression(&mut self) -> ScimResult<Filter> {
        let mut components = vec![self.conjunction()?];
        while self.keyword("or") {
            components.push(self.conjunction()?);
        }
        Ok(if components.len() == 1 {
            components.remove(0)
        } else {
            Filter::Or(components)
        })
    }

    fn conjunction(&mut self) -> ScimResult<Filter> {
        let mut components = vec![self.unary()?];
        while self.keyword("and") {
            components.push(self.unary()?);
        }
        Ok(if components.len() == 1 {
            components.remove(0)
        } else {
            Filter::And(components)
        })
    }

    fn group(&mut self) -> ScimResult<Filter> {
        let inner = self.expression()?;
        self.skip_whitespace();
        if !self.eat(')') {
            return Err(match self.peek() {
                Some(c) => ScimError::invalid_filter(format!(
                    "Expected ')' but found '{}' at position {}",
                    c, self.pos
                )),
                None => self.unexpected_end(),
            });
        }
        Ok(inner)
    }

    fn unary(&mut self) -> ScimResult<Filter> {
        self.skip_whitespace();
        if self.eat('(') {
            return self.group();
        }

        let start = self.pos;
        let token = self.take_while(is_filter_path_char);
        if token.is_empty() {
            return Err(match self.peek() {
                Some(c) => ScimError::invalid_filter(format!(
                    "Unexpected character '{}' at position {}",
                    c, start
                )),
                None => self.unexpected_end(),
            });
        }

        if token.eq_ignore_ascii_case("not") {
            self.skip_whitespace();
            if !self.eat('(') {
                return Err(ScimError::invalid_filter(format!(
                    "Expected '(' after 'not' at position {}",
                    self.pos
                )));
            }
            return Ok(Filter::Not(Box::new(self.group()?)));
        }

        let mut path = parse_path(token).map_err(|e| {
            ScimError::invalid_filter(format!(
                "Invalid attribute path at position {}: {}",
                start,
                e.detail()
            ))
        })?;
        if path.is_root() {
            return Err(ScimError::invalid_filter(format!(
                "Expected attribute path at position {}",
                start
            )));
        }

        if self.eat('[') {
            let inner = self.value_filter()?;
            if !self.eat('.') {
                return Ok(Filter::Complex {
                    path,
                    filter: Box::new(inner),
                });
            }
            // attr[filter].sub compares a sub-attribute of the selected values
            let sub = self.take_while(is_attribute_char);
            if sub.is_empty() {
                return Err(ScimError::invalid_filter(format!(
                    "Expected sub-attribute name at position {}",
                    self.pos
                )));
            }
            let last = path.len() - 1;
            path = path.replace_filter(last, Some(inner)).attribute(sub);
        }

        self.skip_whitespace();
        let op_start = self.pos;
        let op = self.take_while(|c| c.is_ascii_alphabetic());
        if op.is_empty() {
            return Err(self.unexpected_end());
        }
        if op.eq_ignore_ascii_case("pr") {
            return Ok(Filter::Present(path));
        }
        let op = CompareOp::from_keyword(op).ok_or_else(|| {
            ScimError::invalid_filter(format!(
                "Unrecognized operator '{}' at position {}",
                op, op_start
            ))
        })?;
        let value = self.value()?;
        Ok(Filter::Compare { op, path, value })
    }

    fn value(&mut self) -> ScimResult<Value> {
        self.skip_whitespace();
        let start = self.pos;
        let literal = if self.peek() == Some('"') {
            self.bump();
            loop {
                match self.bump() {
                    Some('\\') => {
                        self.bump();
                    }
                    Some('"') => break,
                    Some(_) => {}
                    None => return Err(self.unexpected_end()),
                }
            }
            &self.input[start..self.pos]
        } else {
            self.take_while(|c| !c.is_whitespace() && c != ')' && c != ']')
        };
        if literal.is_empty() {
            return Err(self.unexpected_end());
        }

        let value: Value = serde_json::from_str(literal).map_err(|e| {
            ScimError::invalid_filter(format!(
                "Invalid comparison value '{}' at position {}: {}",
                literal, start, e
            ))
        })?;
        if value.is_array() || value.is_object() {
            return Err(ScimError::invalid_filter(format!(
                "Comparison value at position {} must be a JSON literal",
                start
            )));
        }
        Ok(value)
    }
}
