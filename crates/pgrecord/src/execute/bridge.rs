//! Await statements as scalars, lists, mapped rows or row streams.

use crate::client::{GenericClient, RowStream, StreamingClient};
use crate::error::{RecordError, RecordResult};
use crate::logging::trace_query;
use crate::row::FromRow;
use crate::statement::Statement;
use futures_core::Stream;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

fn first_column<T>(row: &Row) -> RecordResult<T>
where
    T: for<'a> FromSql<'a>,
{
    row.try_get(0).map_err(|e| {
        let column = row
            .columns()
            .first()
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| "0".to_string());
        RecordError::decode(column, e.to_string())
    })
}

/// Execution methods for every [`Statement`].
///
/// Each call validates the statement, traces it on `pgrecord::sql` and runs it
/// once; nothing is cached between calls.
///
/// ```ignore
/// use pgrecord::prelude::*;
///
/// let count: i64 = sql("SELECT COUNT(*) FROM author").fetch_first_value(&client).await?;
/// let authors: Vec<Author> = select_from(Author::TABLE).fetch_all_as(&client).await?;
/// ```
pub trait StatementExt: Statement {
    /// First column of the first row; [`RecordError::NotFound`] on an empty result.
    fn fetch_first_value<T>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<T>> + Send
    where
        T: for<'a> FromSql<'a> + Send,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let row = conn.query_one(&sql.to_sql(), &sql.params_ref()).await?;
            first_column(&row)
        }
    }

    /// First column of the first row, or `None` on an empty result.
    fn fetch_first_value_opt<T>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<Option<T>>> + Send
    where
        T: for<'a> FromSql<'a> + Send,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let row = conn.query_opt(&sql.to_sql(), &sql.params_ref()).await?;
            row.as_ref().map(first_column::<T>).transpose()
        }
    }

    /// First column of every row.
    fn fetch_first_values<T>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<Vec<T>>> + Send
    where
        T: for<'a> FromSql<'a> + Send,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let rows = conn.query(&sql.to_sql(), &sql.params_ref()).await?;
            rows.iter().map(first_column::<T>).collect()
        }
    }

    /// Every row mapped to `T`.
    fn fetch_all_as<T>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<Vec<T>>> + Send
    where
        T: FromRow + Send,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let rows = conn.query(&sql.to_sql(), &sql.params_ref()).await?;
            rows.iter().map(T::from_row).collect()
        }
    }

    /// The first row mapped to `T`; [`RecordError::NotFound`] on an empty result.
    fn fetch_one_as<T>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<T>> + Send
    where
        T: FromRow + Send,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let row = conn.query_one(&sql.to_sql(), &sql.params_ref()).await?;
            T::from_row(&row)
        }
    }

    /// The first row mapped to `T`, or `None` on an empty result.
    fn fetch_opt_as<T>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<Option<T>>> + Send
    where
        T: FromRow + Send,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let row = conn.query_opt(&sql.to_sql(), &sql.params_ref()).await?;
            row.as_ref().map(T::from_row).transpose()
        }
    }

    /// A lazy stream of rows mapped to `T`.
    ///
    /// Rows are decoded as they arrive. The stream ends after the last row and
    /// cannot be restarted; stream again to re-run the statement.
    fn stream_as<T>(
        &self,
        conn: &impl StreamingClient,
    ) -> impl std::future::Future<Output = RecordResult<FromRowStream<T>>> + Send
    where
        T: FromRow + Send + 'static,
    {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            let stream = conn.query_stream(&sql.to_sql(), &sql.params_ref()).await?;
            Ok(FromRowStream::new(stream))
        }
    }

    /// Number of affected rows.
    fn execute(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = RecordResult<u64>> + Send {
        async move {
            self.validate()?;
            let sql = self.render();
            trace_query(&sql);
            conn.execute(&sql.to_sql(), &sql.params_ref()).await
        }
    }
}

impl<S: Statement + ?Sized> StatementExt for S {}

/// Rows of a [`RowStream`] mapped through [`FromRow`].
#[must_use]
pub struct FromRowStream<T> {
    inner: RowStream,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromRowStream<T> {
    pub(crate) fn new(inner: RowStream) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: FromRow> Stream for FromRowStream<T> {
    type Item = RecordResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(row))) => Poll::Ready(Some(T::from_row(&row))),
            Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
