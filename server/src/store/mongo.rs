//! MongoDB-backed store.
//!
//! # Design
//! One `Client` is created at startup and shared by every request; the driver
//! pools connections underneath. Todos are stored as `{_id, completed, body}`
//! documents. Updates go through `findOneAndUpdate` with `$set` built only
//! from the submitted fields, returning the document as stored after the
//! write.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{StoreError, TodoStore};
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

/// On-disk shape of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    completed: bool,
    body: String,
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Todo {
            id: TodoId::from(doc.id),
            completed: doc.completed,
            body: doc.body,
        }
    }
}

impl From<&Todo> for TodoDocument {
    fn from(todo: &Todo) -> Self {
        TodoDocument {
            id: todo.id.object_id(),
            completed: todo.completed,
            body: todo.body.clone(),
        }
    }
}

fn set_document(patch: &TodoPatch) -> Document {
    let mut set = Document::new();
    if let Some(body) = patch.body() {
        set.insert("body", body);
    }
    if let Some(completed) = patch.completed() {
        set.insert("completed", completed);
    }
    set
}

#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Connect and ping the database. Server selection and connection setup
    /// are bounded by `timeout`.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("todo-server".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        info!(database, collection, "connected to MongoDB");

        Ok(Self {
            collection: db.collection(collection),
            client,
        })
    }

    /// Close the driver's pooled connections.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    fn kind(&self) -> &'static str {
        "mongo"
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<TodoDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Todo::from).collect())
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = todo.into_todo(TodoId::generate());
        self.collection.insert_one(TodoDocument::from(&todo)).await?;
        Ok(todo)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let filter = doc! { "_id": id.object_id() };
        // `$set` with an empty document is rejected by the server.
        let stored = if patch.is_empty() {
            self.collection.find_one(filter).await?
        } else {
            self.collection
                .find_one_and_update(filter, doc! { "$set": set_document(&patch) })
                .return_document(ReturnDocument::After)
                .await?
        };
        Ok(stored.map(Todo::from))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson;

    use super::*;

    #[test]
    fn document_uses_underscore_id() {
        let todo = NewTodo::new("buy milk").unwrap().into_todo(TodoId::generate());
        let doc = bson::to_document(&TodoDocument::from(&todo)).unwrap();
        assert_eq!(doc.get_object_id("_id").unwrap(), todo.id.object_id());
        assert_eq!(doc.get_str("body").unwrap(), "buy milk");
        assert!(!doc.get_bool("completed").unwrap());
    }

    #[test]
    fn document_converts_back_to_todo() {
        let id = ObjectId::new();
        let doc = TodoDocument {
            id,
            completed: true,
            body: "x".to_string(),
        };
        let todo = Todo::from(doc);
        assert_eq!(todo.id.object_id(), id);
        assert!(todo.completed);
    }

    #[test]
    fn set_document_contains_only_submitted_fields() {
        let set = set_document(&TodoPatch::set_completed(true));
        assert_eq!(set, doc! { "completed": true });

        let set = set_document(&TodoPatch::default());
        assert!(set.is_empty());
    }
}
