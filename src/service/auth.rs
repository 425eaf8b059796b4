use std::sync::Arc;

use crate::dto::auth::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest};
use crate::repository::{RepositoryError, UserRepository};
use crate::util::AppError;
use crate::util::error::{BusinessError, InternalError, ValidationField, validation_fields};
use crate::util::validation::{EMAIL_REGEX, Form, FormData};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 10;

#[derive(Clone)]
pub struct AuthService<R: UserRepository + Send + Sync + 'static> {
    repository: Arc<R>,
}

impl<R> AuthService<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<(), AppError> {
        let data = FormData::from_iter([
            ("name", payload.name),
            ("email", payload.email),
            ("password", payload.password),
        ]);

        let mut form = Form::new(data);
        form.required(&["name", "email", "password"]);
        form.max_length("name", MAX_NAME_LENGTH);
        form.max_length("email", MAX_EMAIL_LENGTH);
        form.matches_pattern("email", &EMAIL_REGEX);
        form.min_length("password", MIN_PASSWORD_LENGTH);

        if !form.is_valid() {
            return Err(BusinessError::Validation(validation_fields(form.errors())).into());
        }

        match self
            .repository
            .insert(
                form.value("name"),
                form.value("email"),
                form.value("password"),
            )
            .await
        {
            Ok(()) => Ok(()),
            // surfaced as a field-level message, not a 500-class failure
            Err(RepositoryError::DuplicateEmail) => {
                Err(BusinessError::Validation(vec![ValidationField {
                    field: "email".into(),
                    message: "Address is already in use".into(),
                }])
                .into())
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    pub async fn login(&self, payload: LoginRequest) -> Result<LoginResponse, AppError> {
        let data = FormData::from_iter([
            ("email", payload.email),
            ("password", payload.password),
        ]);

        let mut form = Form::new(data);
        form.required(&["email", "password"]);

        if !form.is_valid() {
            return Err(BusinessError::Validation(validation_fields(form.errors())).into());
        }

        let user_id = self
            .repository
            .authenticate(form.value("email"), form.value("password"))
            .await
            .map_err(map_repository_error)?;

        Ok(LoginResponse { user_id })
    }

    pub async fn profile(&self, user_id: i64) -> Result<ProfileResponse, AppError> {
        let user = self
            .repository
            .get(user_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ProfileResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            created: user.created,
        })
    }
}

fn map_repository_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::from(BusinessError::NotFound),
        RepositoryError::InvalidCredentials => AppError::from(BusinessError::InvalidCredentials),
        other => {
            tracing::error!(error = %other, "user repository failure");
            AppError::from(InternalError::Database)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    use crate::domain::{HashedPassword, User};
    use crate::util::password::{hash_password, verify_password};

    #[derive(Default, Clone)]
    struct InMemoryUserRepository {
        users: Arc<RwLock<HashMap<i64, User>>>,
        email_index: Arc<RwLock<HashMap<String, i64>>>,
    }

    impl InMemoryUserRepository {
        async fn deactivate(&self, email: &str) {
            let email_idx = self.email_index.read().await;
            if let Some(id) = email_idx.get(email) {
                if let Some(user) = self.users.write().await.get_mut(id) {
                    user.active = false;
                }
            }
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn insert(
            &self,
            name: &str,
            email: &str,
            password: &str,
        ) -> Result<(), RepositoryError> {
            let mut users = self.users.write().await;
            let mut email_idx = self.email_index.write().await;
            if email_idx.contains_key(email) {
                return Err(RepositoryError::DuplicateEmail);
            }
            // low cost keeps the suite fast
            let hashed = hash_password(password, 4)?;
            let id = (users.len() + 1) as i64;
            let user = User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                hashed_password: HashedPassword::new(hashed)?,
                created: Utc::now(),
                active: true,
            };
            email_idx.insert(email.to_string(), id);
            users.insert(id, user);
            Ok(())
        }

        async fn authenticate(&self, email: &str, password: &str) -> Result<i64, RepositoryError> {
            let email_idx = self.email_index.read().await;
            let users = self.users.read().await;
            let user = email_idx
                .get(email)
                .and_then(|id| users.get(id))
                .filter(|user| user.active)
                .ok_or(RepositoryError::InvalidCredentials)?;

            if verify_password(password, user.hashed_password.as_str())? {
                Ok(user.id)
            } else {
                Err(RepositoryError::InvalidCredentials)
            }
        }

        async fn get(&self, id: i64) -> Result<User, RepositoryError> {
            self.users
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }
    }

    fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let service = AuthService::new(InMemoryUserRepository::default());

        service
            .register(register_request("Alice", "alice@example.org", "pa$$word-12"))
            .await
            .unwrap();

        let login = service
            .login(login_request("alice@example.org", "pa$$word-12"))
            .await
            .unwrap();
        assert_eq!(login.user_id, 1);
    }

    #[tokio::test]
    async fn register_reports_every_violation_at_once() {
        let service = AuthService::new(InMemoryUserRepository::default());
        let err = service
            .register(register_request("", "not-an-address", "short"))
            .await
            .unwrap_err();

        match err {
            AppError::Business(BusinessError::Validation(fields)) => {
                assert!(fields.iter().any(|f| f.field == "name"));
                assert!(
                    fields
                        .iter()
                        .any(|f| f.field == "email" && f.message == "This field is invalid")
                );
                assert!(fields.iter().any(|f| f.field == "password"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_on_the_email_field() {
        let service = AuthService::new(InMemoryUserRepository::default());

        service
            .register(register_request("Alice", "alice@example.org", "pa$$word-12"))
            .await
            .unwrap();
        let err = service
            .register(register_request("Also Alice", "alice@example.org", "pa$$word-34"))
            .await
            .unwrap_err();

        match err {
            AppError::Business(BusinessError::Validation(fields)) => {
                assert_eq!(
                    fields,
                    vec![ValidationField {
                        field: "email".into(),
                        message: "Address is already in use".into(),
                    }]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let service = AuthService::new(InMemoryUserRepository::default());
        service
            .register(register_request("Alice", "alice@example.org", "pa$$word-12"))
            .await
            .unwrap();

        let wrong_password = service
            .login(login_request("alice@example.org", "not-the-password"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login_request("bob@example.org", "whatever-pass"))
            .await
            .unwrap_err();

        assert!(matches!(
            wrong_password,
            AppError::Business(BusinessError::InvalidCredentials)
        ));
        assert!(matches!(
            unknown_email,
            AppError::Business(BusinessError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn inactive_user_cannot_login() {
        let repo = InMemoryUserRepository::default();
        let service = AuthService::new(repo.clone());

        service
            .register(register_request("Alice", "alice@example.org", "pa$$word-12"))
            .await
            .unwrap();
        repo.deactivate("alice@example.org").await;

        let err = service
            .login(login_request("alice@example.org", "pa$$word-12"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn profile_returns_registered_user() {
        let service = AuthService::new(InMemoryUserRepository::default());
        service
            .register(register_request("Alice", "alice@example.org", "pa$$word-12"))
            .await
            .unwrap();

        let profile = service.profile(1).await.unwrap();
        assert_eq!(profile.name, "Alice");
        assert_eq!(profile.email, "alice@example.org");
    }

    #[tokio::test]
    async fn profile_for_unknown_user_is_not_found() {
        let service = AuthService::new(InMemoryUserRepository::default());
        let err = service.profile(99).await.unwrap_err();
        assert!(matches!(err, AppError::Business(BusinessError::NotFound)));
    }
}
