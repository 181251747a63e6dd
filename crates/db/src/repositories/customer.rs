use sqlx::{sqlite::SqliteRow, Row};

use clientela_core::domain::customer::{Customer, CustomerDraft, CustomerId};

use super::{CustomerRepository, RepositoryError};
use crate::DbPool;

/// SQL-backed customer gateway. Every operation checks a connection out of
/// the pool, executes exactly one parameterized statement, and returns the
/// connection on every exit path.
pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn add(&self, draft: CustomerDraft) -> Result<CustomerId, RepositoryError> {
        let result = sqlx::query("INSERT INTO customers (name, email, phone) VALUES (?, ?, ?)")
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(draft.phone.as_deref())
            .execute(&self.pool)
            .await?;

        Ok(CustomerId(result.last_insert_rowid().to_string()))
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, email, phone FROM customers WHERE id = ?")
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|value| customer_from_row(&value)).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, email, phone FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(customer_from_row).collect()
    }

    async fn update(&self, customer: &Customer) -> Result<u64, RepositoryError> {
        let result =
            sqlx::query("UPDATE customers SET name = ?, email = ?, phone = ? WHERE id = ?")
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(customer.phone.as_deref())
                .bind(&customer.id.0)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &CustomerId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(&id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn customer_from_row(row: &SqliteRow) -> Result<Customer, RepositoryError> {
    Ok(Customer {
        id: CustomerId(row.try_get::<i64, _>("id")?.to_string()),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
    })
}

#[cfg(test)]
mod tests {
    use clientela_core::domain::customer::{Customer, CustomerDraft, CustomerId};

    use super::SqlCustomerRepository;
    use crate::repositories::CustomerRepository;
    use crate::{connect_with_settings, migrations, DbPool};

    async fn setup_repo() -> (DbPool, SqlCustomerRepository) {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("run migrations");
        (pool.clone(), SqlCustomerRepository::new(pool))
    }

    fn draft(name: &str, email: &str, phone: Option<&str>) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn add_then_find_round_trips_with_assigned_id() {
        let (pool, repo) = setup_repo().await;

        let id = repo
            .add(draft("Ana Gómez", "ana@example.com", Some("612345678")))
            .await
            .expect("add customer");
        assert!(!id.0.is_empty());

        let found = repo.find_by_id(&id).await.expect("find customer").expect("customer exists");
        assert_eq!(found.id, id);
        assert_eq!(found.name, "Ana Gómez");
        assert_eq!(found.email, "ana@example.com");
        assert_eq!(found.phone.as_deref(), Some("612345678"));

        pool.close().await;
    }

    #[tokio::test]
    async fn absent_phone_round_trips_as_none() {
        let (pool, repo) = setup_repo().await;

        let id = repo.add(draft("Luis Pérez", "luis@example.com", None)).await.expect("add");
        let found = repo.find_by_id(&id).await.expect("find").expect("exists");
        assert_eq!(found.phone, None);

        pool.close().await;
    }

    #[tokio::test]
    async fn find_by_unknown_id_is_none_not_an_error() {
        let (pool, repo) = setup_repo().await;

        let missing = repo.find_by_id(&CustomerId::from("42")).await.expect("lookup");
        assert_eq!(missing, None);

        // Ids that cannot even name a row behave the same way.
        let garbage = repo.find_by_id(&CustomerId::from("nonexistent-id")).await.expect("lookup");
        assert_eq!(garbage, None);

        pool.close().await;
    }

    #[tokio::test]
    async fn list_all_returns_rows_in_insertion_order_and_is_idempotent() {
        let (pool, repo) = setup_repo().await;

        let first = repo.add(draft("Ana Gómez", "ana@example.com", None)).await.expect("add ana");
        let second =
            repo.add(draft("Luis Pérez", "luis@example.com", None)).await.expect("add luis");

        let all = repo.list_all().await.expect("list");
        assert_eq!(all.iter().map(|c| c.id.clone()).collect::<Vec<_>>(), vec![first, second]);

        let again = repo.list_all().await.expect("list again");
        assert_eq!(all, again);

        pool.close().await;
    }

    #[tokio::test]
    async fn list_all_on_empty_table_is_empty() {
        let (pool, repo) = setup_repo().await;

        assert!(repo.list_all().await.expect("list").is_empty());

        pool.close().await;
    }

    #[tokio::test]
    async fn update_overwrites_the_full_row() {
        let (pool, repo) = setup_repo().await;

        let id = repo
            .add(draft("Ana Gómez", "ana@example.com", Some("612345678")))
            .await
            .expect("add");

        let affected = repo
            .update(&Customer {
                id: id.clone(),
                name: "Ana García".to_string(),
                email: "garcia@example.com".to_string(),
                phone: None,
            })
            .await
            .expect("update");
        assert_eq!(affected, 1);

        let found = repo.find_by_id(&id).await.expect("find").expect("exists");
        assert_eq!(found.name, "Ana García");
        assert_eq!(found.email, "garcia@example.com");
        assert_eq!(found.phone, None);

        pool.close().await;
    }

    #[tokio::test]
    async fn update_of_missing_id_affects_zero_rows() {
        let (pool, repo) = setup_repo().await;

        let affected = repo
            .update(&Customer {
                id: CustomerId::from("999"),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                phone: None,
            })
            .await
            .expect("update should not fail");
        assert_eq!(affected, 0);

        pool.close().await;
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_silent_and_leaves_rows_untouched() {
        let (pool, repo) = setup_repo().await;

        repo.add(draft("Ana Gómez", "ana@example.com", None)).await.expect("add");

        let affected = repo
            .delete(&CustomerId::from("nonexistent-id"))
            .await
            .expect("delete should not fail");
        assert_eq!(affected, 0);
        assert_eq!(repo.list_all().await.expect("list").len(), 1);

        pool.close().await;
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (pool, repo) = setup_repo().await;

        let id = repo.add(draft("Ana Gómez", "ana@example.com", None)).await.expect("add");
        let affected = repo.delete(&id).await.expect("delete");
        assert_eq!(affected, 1);
        assert_eq!(repo.find_by_id(&id).await.expect("find"), None);

        pool.close().await;
    }
}
