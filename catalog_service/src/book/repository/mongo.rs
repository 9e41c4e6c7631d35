use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRepository},
    error::{AppError, AppResult},
    model::book::BookId,
    store::{StoreGateway, timeout::CallClass},
};

/// Book document as persisted in the `books` collection.
///
/// The author reference is kept in its external string form under `idauth`, the
/// field name existing documents already use.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "idauth")]
    author_id: String,
    title: String,
}

/// Document store implementation of the book repository.
#[derive(Debug, Clone)]
pub struct MongoBookRepository {
    gateway: StoreGateway,
}

impl MongoBookRepository {
    pub fn new(gateway: StoreGateway) -> Self {
        Self { gateway }
    }

    fn collection(&self) -> Collection<BookDocument> {
        self.gateway.books()
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookId> {
        let collection = self.collection();
        let document = BookDocument::from(record);

        let result = self
            .gateway
            .bound(CallClass::Point, async move {
                Ok::<_, AppError>(collection.insert_one(document).await?)
            })
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Store("inserted book id is not an object id".into()))?;

        Ok(BookId::new(id))
    }

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>> {
        let collection = self.collection();
        let filter = doc! { "_id": id.0.object_id() };

        let document = self
            .gateway
            .bound(CallClass::Point, async move {
                Ok::<_, AppError>(collection.find_one(filter).await?)
            })
            .await?;

        document.map(BookRecordOwned::try_from).transpose()
    }

    async fn select_all(&self) -> AppResult<Vec<BookRecordOwned>> {
        let collection = self.collection();

        let documents: Vec<BookDocument> = self
            .gateway
            .bound(CallClass::Scan, async move {
                let cursor = collection.find(doc! {}).await?;
                Ok::<_, AppError>(cursor.try_collect::<Vec<_>>().await?)
            })
            .await?;

        documents
            .into_iter()
            .map(BookRecordOwned::try_from)
            .collect()
    }
}

impl From<BookRecordInsert> for BookDocument {
    fn from(record: BookRecordInsert) -> Self {
        Self {
            id: None,
            author_id: record.author_id,
            title: record.title,
        }
    }
}

impl TryFrom<BookDocument> for BookRecordOwned {
    type Error = AppError;

    fn try_from(document: BookDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| AppError::Store("book document without `_id`".into()))?;

        Ok(Self {
            id: BookId::new(id),
            author_id: document.author_id,
            title: document.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_common::id::Id;

    use super::*;
    use crate::model::author::AuthorId;

    #[test]
    fn document_layout() {
        let author_id = AuthorId::new(Id::decode("65f1c0a2b3d4e5f601234567").unwrap());
        let document = BookDocument::from(BookRecordInsert::new("Go Deep", &author_id));
        assert_eq!(
            bson::to_document(&document).unwrap(),
            doc! {
                "idauth": "65f1c0a2b3d4e5f601234567",
                "title": "Go Deep",
            }
        );

        let id = ObjectId::new();
        let document: BookDocument = bson::from_document(doc! {
            "_id": id,
            "idauth": "65f1c0a2b3d4e5f601234567",
            "title": "Go Deep",
        })
        .unwrap();
        let record = BookRecordOwned::try_from(document).unwrap();
        assert_eq!(record.id, BookId::new(id));
        assert_eq!(record.author_id().unwrap(), author_id);
    }
}
