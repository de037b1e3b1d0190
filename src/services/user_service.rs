use crate::database::user_store::UserStore;
use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload, UserListQuery};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, User};
use crate::utils::pagination::{Page, PageRequest, DEFAULT_PAGE};

#[derive(Clone)]
pub struct UserService {
    store: UserStore,
    default_per_page: usize,
}

impl UserService {
    pub fn new(store: UserStore, default_per_page: usize) -> Self {
        Self {
            store,
            default_per_page,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn list(&self, query: UserListQuery) -> Result<Page<User>> {
        let request = PageRequest::new(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.per_page.unwrap_or(self.default_per_page),
        )?;
        let page = self.store.page(request);
        tracing::debug!(
            page = page.page,
            per_page = page.per_page,
            returned = page.items.len(),
            total = page.total,
            "Listed users"
        );
        Ok(page)
    }

    pub fn get_by_id(&self, id: u64) -> Result<User> {
        self.store.get(id).ok_or_else(Error::user_not_found)
    }

    pub fn exists(&self, id: u64) -> bool {
        self.store.get(id).is_some()
    }

    pub fn create(&self, payload: CreateUserPayload) -> Result<User> {
        let new_user = NewUser::try_from(payload)?;
        let user = self.store.insert(new_user);
        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    pub fn update(&self, id: u64, payload: UpdateUserPayload) -> Result<User> {
        let user = self
            .store
            .update(id, payload.into())
            .ok_or_else(Error::user_not_found)?;
        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        if !self.store.delete(id) {
            return Err(Error::user_not_found());
        }
        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}
