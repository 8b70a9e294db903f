//! User use-case service.

use crate::model::{EntityKind, NewUser, User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;

/// Use-case service wrapper for user CRUD operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }

    /// Gets one user, `NotFound` when the id does not exist.
    pub fn get_user(&self, id: UserId) -> RepoResult<User> {
        self.repo.get_user(id)?.ok_or(RepoError::NotFound {
            kind: EntityKind::User,
            id,
        })
    }

    pub fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        let created = self.repo.create_user(user)?;
        info!(
            "event=user_create module=service status=ok user_id={}",
            created.id
        );
        Ok(created)
    }

    /// Full replace: `address` left out of `user` is cleared.
    pub fn update_user(&self, id: UserId, user: &NewUser) -> RepoResult<User> {
        self.repo.update_user(id, user)
    }

    /// Deletes a user. Fails with `InUse` while the user still has orders.
    pub fn delete_user(&self, id: UserId) -> RepoResult<()> {
        self.repo.delete_user(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }
}
