//! Filter expression builder
//!
//! The store's filter grammar is `field op "value"` with ops
//! `= != >= > <= < ~` (substring), combined with `&&` / `||`. Building
//! expressions through this module instead of ad-hoc string concatenation
//! keeps quoting in one place and the grammar testable.

use chrono::NaiveDate;

/// A composable filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    expr: String,
}

fn quote(value: &str) -> String {
    // Double quotes inside values are escaped; the grammar has no other
    // metacharacters inside a quoted literal.
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn comparison(field: &str, op: &str, value: &str) -> Filter {
    Filter {
        expr: format!("{field} {op} {}", quote(value)),
    }
}

impl Filter {
    pub fn eq(field: &str, value: &str) -> Self {
        comparison(field, "=", value)
    }

    pub fn ne(field: &str, value: &str) -> Self {
        comparison(field, "!=", value)
    }

    pub fn ge(field: &str, value: &str) -> Self {
        comparison(field, ">=", value)
    }

    pub fn gt(field: &str, value: &str) -> Self {
        comparison(field, ">", value)
    }

    pub fn le(field: &str, value: &str) -> Self {
        comparison(field, "<=", value)
    }

    pub fn lt(field: &str, value: &str) -> Self {
        comparison(field, "<", value)
    }

    /// Substring match (`~`)
    pub fn like(field: &str, value: &str) -> Self {
        comparison(field, "~", value)
    }

    pub fn and(self, other: Filter) -> Self {
        Filter {
            expr: format!("{} && {}", self.expr, other.expr),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        Filter {
            expr: format!("({} || {})", self.expr, other.expr),
        }
    }

    /// Half-open calendar-day range:
    /// `field >= "D 00:00:00" && field < "D+1 00:00:00"`
    pub fn day_range(field: &str, day: NaiveDate) -> Self {
        let next = day.succ_opt().unwrap_or(day);
        Filter::ge(field, &format!("{} 00:00:00", day.format("%Y-%m-%d"))).and(Filter::lt(
            field,
            &format!("{} 00:00:00", next.format("%Y-%m-%d")),
        ))
    }

    pub fn build(self) -> String {
        self.expr
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expr)
    }
}
