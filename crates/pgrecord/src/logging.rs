//! SQL trace logging.

use crate::statement::Statement;

/// Target of SQL trace events.
pub const SQL_TARGET: &str = "pgrecord::sql";

/// Emit `"<label>: <inlined sql>"` at TRACE on [`SQL_TARGET`].
///
/// The statement is only rendered when a subscriber is interested, so calling
/// this on a hot path costs a level check when tracing is off.
pub fn trace_sql<S: Statement + ?Sized>(statement: &S, label: &str) {
    if tracing::enabled!(target: SQL_TARGET, tracing::Level::TRACE) {
        let sql = statement.to_inlined_sql();
        tracing::trace!(target: SQL_TARGET, "{}: {}", label, sql);
    }
}

/// [`trace_sql`] with the label `QUERY`.
pub fn trace_query<S: Statement + ?Sized>(statement: &S) {
    trace_sql(statement, "QUERY");
}
