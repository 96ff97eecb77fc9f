use crate::AdminError;
use mailsift_api::Backend;
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 8;

pub struct AccountController<B> {
    backend: Arc<B>,
}

impl<B: Backend> AccountController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Change the account password. Length and confirmation checks stay
    /// local; the current password is verified server-side.
    pub async fn change_password(
        &mut self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), AdminError> {
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdminError::Validation(
                "La nueva contraseña debe tener al menos 8 caracteres.".to_string(),
            ));
        }
        if new != confirm {
            return Err(AdminError::Validation(
                "Las contraseñas no coinciden.".to_string(),
            ));
        }
        self.backend.change_password(current, new).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::StubBackend;

    #[tokio::test]
    async fn short_or_mismatched_passwords_never_reach_backend() {
        let backend = Arc::new(StubBackend::default());
        let mut account = AccountController::new(backend.clone());
        assert!(matches!(
            account.change_password("old", "corta", "corta").await,
            Err(AdminError::Validation(_))
        ));
        assert!(matches!(
            account.change_password("old", "12345678", "87654321").await,
            Err(AdminError::Validation(_))
        ));
        assert!(backend.password_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_change_is_forwarded() {
        let backend = Arc::new(StubBackend::default());
        let mut account = AccountController::new(backend.clone());
        account
            .change_password("old", "contraseña", "contraseña")
            .await
            .unwrap();
        assert_eq!(
            *backend.password_calls.lock().unwrap(),
            vec![("old".to_string(), "contraseña".to_string())]
        );
    }
}
