use crate::models::{User, UserId};

pub trait UserStore: Send + Sync {
    /// Returns a clone of every record, ordered by id (insertion order).
    fn all(&self) -> Vec<User>;

    /// Gets a clone of a record by its id.
    fn get(&self, id: UserId) -> Option<User>;

    /// Inserts or replaces the record stored under `user.id`.
    fn put(&self, user: User);

    /// Applies `f` to the stored record in place and returns the result.
    fn modify(&self, id: UserId, f: &mut dyn FnMut(&mut User)) -> Option<User>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest id currently stored, if any.
    fn max_id(&self) -> Option<UserId>;
}
