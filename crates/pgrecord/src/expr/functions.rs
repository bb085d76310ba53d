//! Date arithmetic, regex matching, casts and timestamp conversion.

use super::Expr;
use crate::row::PgType;
use crate::sql::Sql;
use chrono::{DateTime, Utc};

impl Expr {
    /// `CAST(expr AS <type>)`, the type name taken from [`PgType`].
    pub fn cast_as<T: PgType>(self) -> Expr {
        let mut sql = Sql::new("CAST(");
        sql.push_sql(self.into_sql());
        sql.push(" AS ").push(&T::pg_type()).push(")");
        Expr::from_sql(sql)
    }

    /// `(expr + INTERVAL 'n days')`
    pub fn plus_days(self, days: i32) -> Expr {
        self.interval('+', days, "days")
    }

    /// `(expr - INTERVAL 'n days')`
    pub fn minus_days(self, days: i32) -> Expr {
        self.interval('-', days, "days")
    }

    /// `(expr + INTERVAL 'n months')`
    pub fn plus_months(self, months: i32) -> Expr {
        self.interval('+', months, "months")
    }

    /// `(expr - INTERVAL 'n months')`
    pub fn minus_months(self, months: i32) -> Expr {
        self.interval('-', months, "months")
    }

    fn interval(self, op: char, amount: i32, unit: &str) -> Expr {
        let mut sql = Sql::new("(");
        sql.push_sql(self.into_sql());
        sql.push(&format!(" {op} INTERVAL '{amount} {unit}')"));
        Expr::from_sql(sql)
    }

    /// `regexp_matches(expr, '<regex>', <flags>)`.
    ///
    /// The pattern is inlined as an escaped literal; `flags` (e.g. `"g"`,
    /// `"i"`) is bound as-is and interpreted by the server. Yields one `text[]`
    /// row per match.
    pub fn regexp_matches(self, regex: &str, flags: &str) -> Expr {
        let mut sql = Sql::new("regexp_matches(");
        sql.push_sql(self.into_sql());
        sql.push(", ");
        sql.push_inline(regex.to_string());
        sql.push(", ");
        sql.push_bind(flags.to_string());
        sql.push(")");
        Expr::from_sql(sql)
    }

    /// `TO_TIMESTAMP(<epoch seconds>)`
    pub fn epoch_timestamp(instant: DateTime<Utc>) -> Expr {
        Expr::raw(format!("TO_TIMESTAMP({})", instant.timestamp()))
    }
}
