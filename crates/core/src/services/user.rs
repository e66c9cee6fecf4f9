use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    auth::{hash_password, verify_password},
    errors::{LabError, LabResult},
    models::{
        DEFAULT_PROFILE_PICTURE, LoginRequest, NewUser, RegisterRequest, Role,
        UpdatePasswordRequest, UpdateProfileRequest, User, UserResponse,
    },
    pagination::{DEFAULT_LIMIT, ListQuery, Paginated},
    repositories::UserRepository,
    services::{present, required},
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Self-service sign-up. The account role is always `user`.
    pub async fn register(&self, input: RegisterRequest) -> LabResult<UserResponse> {
        let full_name = required("full_name", &input.full_name)?;
        let email = required("email", &input.email)?.to_lowercase();
        let nim_nip = required("nim_nip", &input.nim_nip)?;
        let password = present("password", &input.password)?;
        let confirm_password = present("confirm_password", &input.confirm_password)?;
        if password != confirm_password {
            return Err(LabError::validation(
                "password and confirm_password do not match",
            ));
        }

        if self.users.get_user_by_email(email.clone()).await?.is_some() {
            return Err(LabError::validation(format!(
                "email {} is already registered",
                email
            )));
        }

        let user = self
            .users
            .create_user(NewUser {
                full_name,
                email,
                password_hash: hash_password(password)?,
                nim_nip,
                profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
                role: Role::User,
            })
            .await?;
        info!("Registered user {}", user.id);

        Ok(user.into())
    }

    /// Verifies credentials. Token issuing is left to the HTTP layer.
    pub async fn login(&self, input: LoginRequest) -> LabResult<User> {
        let email = required("email", &input.email)?.to_lowercase();
        let password = present("password", &input.password)?;

        let user = match self.users.get_user_by_email(email).await? {
            Some(user) if user.deleted_at.is_none() => user,
            _ => return Err(invalid_credentials()),
        };
        if !verify_password(password, &user.password_hash)? {
            warn!("Failed login for user {}", user.id);
            return Err(invalid_credentials());
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> LabResult<UserResponse> {
        self.find(id).await.map(Into::into)
    }

    pub async fn update_profile(
        &self,
        id: i64,
        input: UpdateProfileRequest,
    ) -> LabResult<UserResponse> {
        let full_name = required("full_name", &input.full_name)?;
        let email = required("email", &input.email)?.to_lowercase();
        let nim_nip = required("nim_nip", &input.nim_nip)?;

        let user = self.find(id).await?;
        if email != user.email {
            if let Some(other) = self.users.get_user_by_email(email.clone()).await? {
                if other.id != id {
                    return Err(LabError::validation(format!(
                        "email {} is already registered",
                        email
                    )));
                }
            }
        }

        let user = self
            .users
            .save_user(User {
                full_name,
                email,
                nim_nip,
                ..user
            })
            .await?;
        Ok(user.into())
    }

    pub async fn update_password(
        &self,
        id: i64,
        input: UpdatePasswordRequest,
    ) -> LabResult<UserResponse> {
        let old_password = present("old_password", &input.old_password)?;
        let new_password = present("new_password", &input.new_password)?;
        let confirm_password = present("confirm_password", &input.confirm_password)?;
        if new_password != confirm_password {
            return Err(LabError::validation(
                "new_password and confirm_password do not match",
            ));
        }

        let user = self.find(id).await?;
        if !verify_password(old_password, &user.password_hash)? {
            return Err(LabError::validation("old_password is incorrect"));
        }

        let user = self
            .users
            .save_user(User {
                password_hash: hash_password(new_password)?,
                ..user
            })
            .await?;
        info!("User {} changed their password", user.id);
        Ok(user.into())
    }

    pub async fn list_users(
        &self,
        query: &ListQuery,
        include_deleted: bool,
    ) -> LabResult<Paginated<UserResponse>> {
        let page = query.page(DEFAULT_LIMIT);
        let (users, total) = self
            .users
            .list_users(page, query.term(), include_deleted)
            .await?;
        Ok(Paginated::new(users, page, total).map(UserResponse::from))
    }

    /// Soft delete: the row stays but the account can no longer log in.
    pub async fn delete_user(&self, id: i64) -> LabResult<()> {
        self.find(id).await?;
        self.users.soft_delete_user(id).await?;
        info!("Soft-deleted user {}", id);
        Ok(())
    }

    async fn find(&self, id: i64) -> LabResult<User> {
        self.users
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| LabError::not_found(format!("user {} not found", id)))
    }
}

fn invalid_credentials() -> LabError {
    LabError::Authentication("invalid email or password".to_string())
}
