use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

/// Process-local store. Todos are kept in insertion order; every mutation
/// takes the write lock for its whole read-modify-write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = todo.into_todo(TodoId::generate());
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        patch.apply(todo);
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let mut todos = self.todos.write().await;
        match todos.iter().position(|t| t.id == id) {
            Some(index) => {
                todos.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
