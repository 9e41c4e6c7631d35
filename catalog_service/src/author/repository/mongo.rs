use async_trait::async_trait;
use bson::{DateTime, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::{
    author::repository::{AuthorRecordInsert, AuthorRecordOwned, AuthorRepository},
    error::{AppError, AppResult},
    model::author::AuthorId,
    store::{StoreGateway, timeout::CallClass},
};

/// Author document as persisted in the `authors` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthorDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    birthdate: DateTime,
}

/// Document store implementation of the author repository.
#[derive(Debug, Clone)]
pub struct MongoAuthorRepository {
    gateway: StoreGateway,
}

impl MongoAuthorRepository {
    pub fn new(gateway: StoreGateway) -> Self {
        Self { gateway }
    }

    fn collection(&self) -> Collection<AuthorDocument> {
        self.gateway.authors()
    }
}

#[async_trait]
impl AuthorRepository for MongoAuthorRepository {
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorId> {
        let collection = self.collection();
        let document = AuthorDocument::from(record);

        let result = self
            .gateway
            .bound(CallClass::Point, async move {
                Ok::<_, AppError>(collection.insert_one(document).await?)
            })
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Store("inserted author id is not an object id".into()))?;

        Ok(AuthorId::new(id))
    }

    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>> {
        let collection = self.collection();
        let filter = doc! { "_id": id.0.object_id() };

        let document = self
            .gateway
            .bound(CallClass::Point, async move {
                Ok::<_, AppError>(collection.find_one(filter).await?)
            })
            .await?;

        document.map(AuthorRecordOwned::try_from).transpose()
    }

    async fn select_multiple(&self, ids: &[AuthorId]) -> AppResult<Vec<AuthorRecordOwned>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ObjectId> = ids.iter().map(|id| id.0.object_id()).collect();
        self.find(doc! { "_id": { "$in": ids } }).await
    }

    async fn select_all(&self) -> AppResult<Vec<AuthorRecordOwned>> {
        self.find(doc! {}).await
    }
}

impl MongoAuthorRepository {
    async fn find(&self, filter: bson::Document) -> AppResult<Vec<AuthorRecordOwned>> {
        let collection = self.collection();

        let documents: Vec<AuthorDocument> = self
            .gateway
            .bound(CallClass::Scan, async move {
                let cursor = collection.find(filter).await?;
                Ok::<_, AppError>(cursor.try_collect::<Vec<_>>().await?)
            })
            .await?;

        documents
            .into_iter()
            .map(AuthorRecordOwned::try_from)
            .collect()
    }
}

impl From<AuthorRecordInsert> for AuthorDocument {
    fn from(record: AuthorRecordInsert) -> Self {
        Self {
            id: None,
            name: record.name,
            birthdate: record.birthdate.into(),
        }
    }
}

impl TryFrom<AuthorDocument> for AuthorRecordOwned {
    type Error = AppError;

    fn try_from(document: AuthorDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| AppError::Store("author document without `_id`".into()))?;

        Ok(Self {
            id: AuthorId::new(id),
            name: document.name,
            birthdate: document.birthdate.try_into()?,
        })
    }
}
