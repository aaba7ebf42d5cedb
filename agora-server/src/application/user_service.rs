use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{CreatedUser, NewUser, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, SignupRequest, UpdateUserRequest, User};

/// What login hands back: the public identity, nothing else. No token
/// is issued anywhere in this service.
#[derive(Debug, Clone)]
pub(crate) struct Profile {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
}

pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn signup(&self, req: SignupRequest) -> Result<CreatedUser, DomainError> {
        let req = req.validate()?;

        let password_hash = hash_password(&req.password)?;
        let new_user = NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            phone: req.phone,
        };

        self.repo.create_user(new_user).await
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<Profile, DomainError> {
        let req = req.validate()?;

        let creds = self
            .repo
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| DomainError::Auth("user not found".to_string()))?;

        verify_password(&req.password, &creds.password_hash)?;

        Ok(Profile {
            id: creds.id,
            username: creds.username,
            email: creds.email,
        })
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list_users().await
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))
    }

    /// Replaces the mutable profile fields. Updating an unknown id is
    /// reported as success, matching the uniform idempotent-write
    /// policy of the delete endpoints.
    pub(crate) async fn update_user(
        &self,
        id: i64,
        req: UpdateUserRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let patch = UserPatch {
            email: req.email,
            phone: req.phone,
            avatar: req.avatar,
        };
        self.repo.update_user(id, patch).await?;
        Ok(())
    }

    /// Idempotent: deleting an absent user succeeds with zero rows
    /// affected.
    pub(crate) async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete_user(id).await?;
        Ok(())
    }
}

pub(crate) fn hash_password(raw_password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = argon2()?
        .hash_password(raw_password.as_bytes(), &salt)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(password_hash.to_string())
}

pub(crate) fn verify_password(raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    argon2()?
        .verify_password(raw_password.as_bytes(), &parsed_hash)
        .map_err(|err| match err {
            PasswordHashError::Password => DomainError::Auth("invalid password".to_string()),
            _ => DomainError::Unexpected(err.to_string()),
        })?;

    Ok(())
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params = Params::new(19 * 1024, 2, 1, None)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::{UserService, hash_password, verify_password};
    use crate::data::user_repository::{
        CreatedUser, NewUser, UserCredentials, UserPatch, UserRepository,
    };
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, SignupRequest, User};

    #[derive(Clone, Default)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        login_credentials: Arc<Mutex<Option<UserCredentials>>>,
        users: Arc<Mutex<Vec<User>>>,
        deleted_rows: Arc<Mutex<u64>>,
    }

    impl FakeUserRepo {
        fn set_login_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<CreatedUser, DomainError> {
            let created = CreatedUser {
                id: 1,
                username: input.username.clone(),
                email: input.email.clone(),
            };
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(created)
        }

        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned")
                .clone())
        }

        async fn list_users(&self) -> Result<Vec<User>, DomainError> {
            Ok(self.users.lock().expect("users mutex poisoned").clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .expect("users mutex poisoned")
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn update_user(&self, _id: i64, _patch: UserPatch) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn delete_user(&self, _id: i64) -> Result<u64, DomainError> {
            Ok(*self.deleted_rows.lock().expect("deleted rows mutex poisoned"))
        }
    }

    fn signup_req(password: &str) -> SignupRequest {
        SignupRequest {
            username: "valid_user".to_string(),
            email: "valid@example.com".to_string(),
            password: password.to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn signup_stores_a_hash_that_verifies_against_the_plaintext() {
        let repo = FakeUserRepo::default();
        let service = UserService::new(repo.clone());

        let created = service
            .signup(signup_req("very-secure-password"))
            .await
            .expect("signup must succeed");
        assert_eq!(created.username, "valid_user");

        let stored = repo.take_created_input().expect("create_user must be called");
        assert_ne!(stored.password_hash, "very-secure-password");
        verify_password("very-secure-password", &stored.password_hash)
            .expect("hash must verify against the submitted plaintext");
    }

    #[tokio::test]
    async fn login_round_trip_returns_the_signup_id() {
        let repo = FakeUserRepo::default();
        let service = UserService::new(repo.clone());

        let hash = hash_password("correct-password").expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            id: 42,
            username: "valid_user".to_string(),
            email: "valid@example.com".to_string(),
            password_hash: hash,
        }));

        let profile = service
            .login(LoginRequest {
                username: "valid_user".to_string(),
                password: "correct-password".to_string(),
            })
            .await
            .expect("login must succeed");

        assert_eq!(profile.id, 42);
        assert_eq!(profile.username, "valid_user");
    }

    #[tokio::test]
    async fn login_reports_user_not_found_for_unknown_username() {
        let repo = FakeUserRepo::default();
        repo.set_login_credentials(None);
        let service = UserService::new(repo);

        let err = service
            .login(LoginRequest {
                username: "nobody".to_string(),
                password: "some-password".to_string(),
            })
            .await
            .expect_err("login must fail");

        match err {
            DomainError::Auth(message) => assert_eq!(message, "user not found"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_reports_invalid_password_for_wrong_password() {
        let repo = FakeUserRepo::default();
        let service = UserService::new(repo.clone());

        let hash = hash_password("correct-password").expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            id: 1,
            username: "valid_user".to_string(),
            email: "valid@example.com".to_string(),
            password_hash: hash,
        }));

        let err = service
            .login(LoginRequest {
                username: "valid_user".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .expect_err("login must fail");

        match err {
            DomainError::Auth(message) => assert_eq!(message, "invalid password"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn user_payloads_never_serialize_a_password_field() {
        let user = User {
            id: 1,
            username: "valid_user".to_string(),
            email: "valid@example.com".to_string(),
            phone: None,
            avatar: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).expect("user must serialize");
        let object = json.as_object().expect("user must serialize to an object");
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
    }

    #[tokio::test]
    async fn delete_of_missing_user_is_silent_success() {
        let repo = FakeUserRepo::default();
        let service = UserService::new(repo);

        service
            .delete_user(999)
            .await
            .expect("delete of an absent user must succeed");
    }
}
