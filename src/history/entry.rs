use std::fmt;

use bigdecimal::BigDecimal;

use crate::util::num::to_plain_string;

/// An `(expression, result)` pair.
///
/// The expression is stored on a single line: any line break inside it is
/// folded into a space when the entry is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    expression: String,
    result:     BigDecimal,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(expression: &str, result: BigDecimal) -> Self {
        Self { expression: fold_lines(expression),
               result }
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub const fn result(&self) -> &BigDecimal {
        &self.result
    }

    /// The entry as it is written to the history file, separator included.
    #[must_use]
    pub fn to_record(&self) -> String {
        format!("{}\n{}\n\n", self.expression, to_plain_string(&self.result))
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, to_plain_string(&self.result))
    }
}

fn fold_lines(expression: &str) -> String {
    expression.lines()
              .map(str::trim)
              .filter(|line| !line.is_empty())
              .collect::<Vec<_>>()
              .join(" ")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn line_breaks_are_folded() {
        let entry = HistoryEntry::new("1 +\r\n  2\n", BigDecimal::from(3_i64));

        assert_eq!(entry.expression(), "1 + 2");
        assert_eq!(entry.to_record(), "1 + 2\n3\n\n");
    }

    #[test]
    fn results_are_rendered_plain() {
        let entry = HistoryEntry::new("10^3", BigDecimal::from_str("1E+3").unwrap());

        assert_eq!(entry.to_string(), "10^3 = 1000");
    }
}
