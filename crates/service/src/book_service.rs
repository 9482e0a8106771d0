use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use common::pagination::Pagination;
use models::library::book::{self, NewBook};
use crate::errors::ServiceError;

pub use models::library::book::Model as Book;

/// Create a book; a client-supplied id must not already exist.
#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_book(db: &DatabaseConnection, input: NewBook) -> Result<Book, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    if let Some(id) = input.id {
        if book::find(&txn, id).await?.is_some() {
            return Err(ServiceError::conflict(format!("Book with id {id} already exists")));
        }
    }
    let created = book::create(&txn, &input).await.map_err(|e| match (e, input.id) {
        (models::errors::ModelError::Conflict(_), Some(id)) => ServiceError::conflict(format!("Book with id {id} already exists")),
        (e, _) => e.into(),
    })?;
    txn.commit().await?;
    info!(id = created.id, "book_created");
    Ok(created)
}

/// Get a book by id.
pub async fn get_book(db: &DatabaseConnection, id: i32) -> Result<Option<Book>, ServiceError> {
    Ok(book::find(db, id).await?)
}

/// List books with skip/limit.
pub async fn list_books(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<Book>, ServiceError> {
    let (skip, limit) = opts.normalize();
    Ok(book::list(db, skip, limit).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::library_db;

    fn dune() -> NewBook {
        NewBook { id: None, title: "Dune".into(), author: "Herbert".into(), year: 1965 }
    }

    #[tokio::test]
    async fn book_create_then_get_is_identical() -> Result<(), anyhow::Error> {
        let db = library_db().await?;
        let created = create_book(&db, dune()).await?;
        assert!(created.id > 0);
        assert_eq!(created.title, "Dune");
        assert_eq!(created.author, "Herbert");
        assert_eq!(created.year, 1965);

        let found = get_book(&db, created.id).await?.unwrap();
        assert_eq!(found, created);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_explicit_id_is_rejected() -> Result<(), anyhow::Error> {
        let db = library_db().await?;
        let first = create_book(&db, NewBook { id: Some(3), ..dune() }).await?;
        assert_eq!(first.id, 3);

        let err = create_book(&db, NewBook { id: Some(3), ..dune() }).await.unwrap_err();
        assert_eq!(err.to_string(), "Book with id 3 already exists");
        assert_eq!(list_books(&db, Pagination::default()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn list_respects_skip_and_limit() -> Result<(), anyhow::Error> {
        let db = library_db().await?;
        for i in 0..5 {
            create_book(&db, NewBook { title: format!("Vol {i}"), ..dune() }).await?;
        }
        let page = list_books(&db, Pagination { skip: 1, limit: 2 }).await?;
        let titles: Vec<_> = page.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Vol 1", "Vol 2"]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_book_is_none() -> Result<(), anyhow::Error> {
        let db = library_db().await?;
        assert!(get_book(&db, 12345).await?.is_none());
        Ok(())
    }
}
