//! Storage behind the user directory.

pub mod interface;

use {
    crate::{
        models::{User, UserId},
        store::interface::UserStore,
    },
    dashmap::DashMap,
};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<UserId, User>,
}

impl InMemoryUserStore {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        InMemoryUserStore {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn all(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|user| user.id);
        users
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    fn put(&self, user: User) {
        self.users.insert(user.id, user);
    }

    fn modify(&self, id: UserId, f: &mut dyn FnMut(&mut User)) -> Option<User> {
        let mut entry = self.users.get_mut(&id)?;
        f(entry.value_mut());
        Some(entry.value().clone())
    }

    fn len(&self) -> usize {
        self.users.len()
    }

    fn max_id(&self) -> Option<UserId> {
        self.users.iter().map(|entry| *entry.key()).max()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::models::{NewUser, UserStatus},
        chrono::NaiveDate,
    };

    fn user(id: u64, name: &str) -> User {
        User::from_new(
            UserId(id),
            NewUser::named(name, format!("06000000{id:02}")),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_all_is_ordered_by_id() {
        let store = InMemoryUserStore::new(vec![user(3, "c"), user(1, "a"), user(2, "b")]);

        let names: Vec<String> = store.all().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(store.max_id(), Some(UserId(3)));
    }

    #[test]
    fn test_modify_existing_and_missing() {
        let store = InMemoryUserStore::new(vec![user(1, "a")]);

        let updated = store.modify(UserId(1), &mut |u: &mut User| u.status = UserStatus::Blocked);
        assert_eq!(updated.unwrap().status, UserStatus::Blocked);
        assert_eq!(store.get(UserId(1)).unwrap().status, UserStatus::Blocked);

        assert!(store.modify(UserId(9), &mut |u: &mut User| u.name.clear()).is_none());
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryUserStore::default();
        assert!(store.is_empty());
        assert_eq!(store.max_id(), None);
        assert!(store.all().is_empty());
    }
}
