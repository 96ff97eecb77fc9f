use crate::AdminError;
use mailsift_api::Backend;
use mailsift_core::TodoItem;
use std::sync::Arc;
use tracing::debug;

/// Pending-actions list backed by the server. The local copy mirrors the
/// last server response; every mutation re-reads from that copy.
pub struct TodoController<B> {
    backend: Arc<B>,
    items: Vec<TodoItem>,
}

impl<B: Backend> TodoController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub async fn load(&mut self) -> Result<&[TodoItem], AdminError> {
        self.items = self.backend.list_todos().await?;
        Ok(&self.items)
    }

    /// Create a task, optionally linked to a message. Blank titles never
    /// reach the backend.
    pub async fn create(
        &mut self,
        title: &str,
        message_id: Option<&str>,
    ) -> Result<TodoItem, AdminError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AdminError::Validation(
                "La tarea necesita un título.".to_string(),
            ));
        }
        let created = self.backend.create_todo(title, message_id).await?;
        self.items.push(created.clone());
        Ok(created)
    }

    /// Flip the done flag of the task with the given id. Unknown ids are
    /// logged and ignored so a stale list cannot error the whole panel.
    pub async fn toggle(&mut self, id: &str) -> Result<(), AdminError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(id, "toggle for unknown todo");
            return Ok(());
        };
        let mut updated = item.clone();
        updated.done = !updated.done;
        *item = self.backend.update_todo(&updated).await?;
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), AdminError> {
        self.backend.delete_todo(id).await?;
        self.items.retain(|item| item.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::StubBackend;

    #[tokio::test]
    async fn create_trims_and_appends() {
        let mut todos = TodoController::new(Arc::new(StubBackend::default()));
        todos.load().await.unwrap();
        let before = todos.items().len();
        let created = todos.create("  llamar a Ana  ", Some("m1")).await.unwrap();
        assert_eq!(created.title, "llamar a Ana");
        assert_eq!(todos.items().len(), before + 1);
    }

    #[tokio::test]
    async fn blank_title_is_rejected_locally() {
        let backend = Arc::new(StubBackend::default());
        let mut todos = TodoController::new(backend.clone());
        assert!(matches!(
            todos.create("   ", None).await,
            Err(AdminError::Validation(_))
        ));
        assert!(backend.todos.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_round_trips_through_backend() {
        let mut todos = TodoController::new(Arc::new(StubBackend::default()));
        todos.create("revisar factura", None).await.unwrap();
        let id = todos.items()[0].id.clone();
        assert!(!todos.items()[0].done);
        todos.toggle(&id).await.unwrap();
        assert!(todos.items()[0].done);
        todos.toggle(&id).await.unwrap();
        assert!(!todos.items()[0].done);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_a_no_op() {
        let mut todos = TodoController::new(Arc::new(StubBackend::default()));
        todos.toggle("missing").await.unwrap();
        assert!(todos.items().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_locally_and_remotely() {
        let backend = Arc::new(StubBackend::default());
        let mut todos = TodoController::new(backend.clone());
        todos.create("a", None).await.unwrap();
        todos.create("b", None).await.unwrap();
        let id = todos.items()[0].id.clone();
        todos.delete(&id).await.unwrap();
        assert_eq!(todos.items().len(), 1);
        assert_eq!(backend.todos.lock().unwrap().len(), 1);
    }
}
