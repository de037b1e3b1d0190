use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::database::seed;
use crate::models::user::{NewUser, User, UserChanges};
use crate::utils::pagination::{paginate, Page, PageRequest};

/// Ordered, in-memory user collection shared by every request.
///
/// All access goes through one `RwLock`: lookups and listings share it,
/// mutations take it exclusively. Nothing awaits or performs I/O while the
/// lock is held. Clones are handles to the same collection.
#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three fixed users, stamped with the current time.
    pub fn seeded() -> Self {
        Self::with_users(seed::seed_users(Utc::now()))
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    // Mutations are applied in one step; a poisoned lock still guards a
    // consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<User> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn page(&self, request: PageRequest) -> Page<User> {
        let users = self.read();
        paginate(users.as_slice(), request)
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.read().iter().find(|user| user.id == id).cloned()
    }

    /// Appends a record with id one past the current last record's id. Ids
    /// come from the collection, not a counter: removing the newest record
    /// frees its id for the next insert.
    pub fn insert(&self, new_user: NewUser) -> User {
        let mut users = self.write();
        let id = users.last().map_or(1, |last| last.id + 1);
        let user = User::from_new(id, new_user, Utc::now());
        users.push(user.clone());
        user
    }

    pub fn update(&self, id: u64, changes: UserChanges) -> Option<User> {
        let mut users = self.write();
        let user = users.iter_mut().find(|user| user.id == id)?;
        user.apply(changes, Utc::now());
        Some(user.clone())
    }

    pub fn delete(&self, id: u64) -> bool {
        let mut users = self.write();
        match users.iter().position(|user| user.id == id) {
            Some(index) => {
                users.remove(index);
                true
            }
            None => false,
        }
    }
}
