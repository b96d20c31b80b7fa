//! Database dispatch macros for reducing code duplication.
//!
//! `sqlx` pools are typed per backend, so a statement that reads the same for
//! PostgreSQL and SQLite still has to be compiled once per pool type. These
//! macros expand the match over `DbPool` at compile time.

/// Macro for generating database dispatch match arms.
///
/// Two forms are accepted: explicit arms per variant, or a single body that is
/// repeated for every variant with the pool bound to the given name.
///
/// # Example
///
/// ```ignore
/// impl_db_dispatch!(pool, {
///     Postgres(p) => do_postgres(p),
///     SQLite(p) => do_sqlite(p),
/// });
///
/// impl_db_dispatch!(pool, |p| sqlx::query(sql).execute(p).await?);
/// ```
#[macro_export]
macro_rules! impl_db_dispatch {
    ($pool:expr, { $($variant:ident($p:ident) => $body:expr),+ $(,)? }) => {
        match $pool {
            $(
                $crate::db::pool::DbPool::$variant($p) => $body,
            )+
        }
    };
    ($pool:expr, |$p:ident| $body:expr) => {
        match $pool {
            $crate::db::pool::DbPool::Postgres($p) => $body,
            $crate::db::pool::DbPool::SQLite($p) => $body,
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::db::pool::DbPool;
    use sqlx::sqlite::SqlitePoolOptions;

    fn backend_name(pool: &DbPool) -> &'static str {
        impl_db_dispatch!(pool, {
            Postgres(_p) => "postgres",
            SQLite(_p) => "sqlite",
        })
    }

    #[tokio::test]
    async fn test_dispatch_forms() {
        let pool = DbPool::SQLite(
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await
                .unwrap(),
        );
        assert_eq!(backend_name(&pool), "sqlite");

        let one: i64 = impl_db_dispatch!(&pool, |p| sqlx::query_scalar("SELECT 1")
            .fetch_one(p)
            .await
            .unwrap());
        assert_eq!(one, 1);
        pool.close().await;
    }
}
