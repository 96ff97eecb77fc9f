use crate::AdminError;
use mailsift_api::Backend;
use mailsift_core::Mailbox;
use std::sync::Arc;

/// Connected-mailbox management panel.
pub struct MailboxController<B> {
    backend: Arc<B>,
    mailboxes: Vec<Mailbox>,
}

impl<B: Backend> MailboxController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            mailboxes: Vec::new(),
        }
    }

    pub fn mailboxes(&self) -> &[Mailbox] {
        &self.mailboxes
    }

    pub async fn load(&mut self) -> Result<&[Mailbox], AdminError> {
        self.mailboxes = self.backend.list_mailboxes().await?;
        Ok(&self.mailboxes)
    }

    pub async fn create(&mut self, address: &str, provider: &str) -> Result<Mailbox, AdminError> {
        let address = address.trim();
        if address.is_empty() || !address.contains('@') {
            return Err(AdminError::Validation(
                "Introduce una dirección de correo válida.".to_string(),
            ));
        }
        if provider.trim().is_empty() {
            return Err(AdminError::Validation(
                "Selecciona un proveedor.".to_string(),
            ));
        }
        let created = self.backend.create_mailbox(address, provider.trim()).await?;
        self.mailboxes.push(created.clone());
        Ok(created)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), AdminError> {
        self.backend.delete_mailbox(id).await?;
        self.mailboxes.retain(|mailbox| mailbox.id != id);
        Ok(())
    }
}
