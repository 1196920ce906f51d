//! User directory service: lookup, creation, edits and status changes over
//! the account collection, plus the dashboard aggregate.
//!
//! Every call first waits out its simulated latency, then runs against the
//! store in one step. A missing user is reported as `None`, never as an error.

pub mod seed;

use {
    crate::{
        latency::{Clock, Delay, Latency},
        metrics::{DIRECTORY_OPERATION_TIME_SECONDS, USER_STATUS_TOGGLES_TOTAL, USERS_CREATED_TOTAL},
        models::{DirectoryStats, NewUser, User, UserId, UserPatch},
        store::interface::UserStore,
    },
    rust_decimal::Decimal,
    std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    tracing::{debug, info},
};

pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    delay: Arc<dyn Delay>,
    clock: Arc<dyn Clock>,
    latency: Latency,
    // Monotonic, never reused even if the collection shrinks
    next_id: AtomicU64,
}

impl UserDirectory {
    pub fn new(
        store: Arc<dyn UserStore>,
        delay: Arc<dyn Delay>,
        clock: Arc<dyn Clock>,
        latency: Latency,
    ) -> Self {
        let next_id = store.max_id().map_or(1, |id| id.0 + 1);

        UserDirectory {
            store,
            delay,
            clock,
            latency,
            next_id: AtomicU64::new(next_id),
        }
    }

    /// First user, in collection order, whose phone contains `fragment`.
    pub async fn search_by_phone(&self, fragment: &str) -> Option<User> {
        self.delay.pause(self.latency.search).await;

        let found = crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, {
            self.store
                .all()
                .into_iter()
                .find(|user| user.phone.contains(fragment))
        });

        debug!(fragment, found = found.is_some(), "Phone search");
        found
    }

    pub async fn get_by_id(&self, id: UserId) -> Option<User> {
        self.delay.pause(self.latency.get).await;

        crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, { self.store.get(id) })
    }

    /// Every user in collection order.
    pub async fn list_all(&self) -> Vec<User> {
        self.delay.pause(self.latency.list).await;

        crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, { self.store.all() })
    }

    pub async fn create(&self, fields: NewUser) -> User {
        self.delay.pause(self.latency.create).await;

        let user = crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, {
            let id = UserId(self.next_id.fetch_add(1, Ordering::SeqCst));
            let user = User::from_new(id, fields, self.clock.today());
            self.store.put(user.clone());
            user
        });

        USERS_CREATED_TOTAL.inc();
        info!("Created user {} ({})", user.id, user.name);
        user
    }

    /// Merges `patch` over the stored user and returns the result.
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Option<User> {
        self.delay.pause(self.latency.update).await;

        let mut patch = Some(patch);
        let updated = crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, {
            self.store.modify(id, &mut |user: &mut User| {
                if let Some(patch) = patch.take() {
                    user.apply(patch);
                }
            })
        });

        match &updated {
            Some(user) => info!("Updated user {}", user.id),
            None => debug!("Update skipped, user {} not found", id),
        }
        updated
    }

    /// Flips a user between active and blocked.
    pub async fn toggle_status(&self, id: UserId) -> Option<User> {
        self.delay.pause(self.latency.toggle).await;

        let updated = crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, {
            self.store
                .modify(id, &mut |user: &mut User| user.status = user.status.toggled())
        })?;

        USER_STATUS_TOGGLES_TOTAL.inc();
        info!("User {} is now {}", updated.id, updated.status);
        Some(updated)
    }

    /// Recomputed from scratch on every call.
    pub async fn statistics(&self) -> DirectoryStats {
        self.delay.pause(self.latency.stats).await;

        crate::measure!(DIRECTORY_OPERATION_TIME_SECONDS, {
            let users = self.store.all();
            let active_users = users.iter().filter(|user| user.is_active()).count();

            DirectoryStats {
                total_users: users.len(),
                active_users,
                blocked_users: users.len() - active_users,
                total_balance: users.iter().map(|user| user.balance).sum::<Decimal>(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            latency::{FixedClock, NoDelay, RecordingDelay},
            models::UserStatus,
            store::InMemoryUserStore,
        },
        chrono::{NaiveDate, TimeZone, Utc},
        std::time::Duration,
    };

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()))
    }

    fn seeded_directory() -> UserDirectory {
        UserDirectory::new(
            Arc::new(InMemoryUserStore::new(seed::seed_users())),
            Arc::new(NoDelay),
            clock(),
            Latency::default(),
        )
    }

    #[tokio::test]
    async fn test_statistics_over_seed() {
        let directory = seeded_directory();

        let stats = directory.statistics().await;

        assert_eq!(
            stats,
            DirectoryStats {
                total_users: 3,
                active_users: 2,
                blocked_users: 1,
                total_balance: Decimal::new(548130, 2),
            }
        );
    }

    #[tokio::test]
    async fn test_search_by_phone() {
        let directory = seeded_directory();

        let found = directory.search_by_phone("0612345678").await;
        assert_eq!(found.unwrap().name, "Mohammed Alami");

        assert!(directory.search_by_phone("9999999999").await.is_none());
    }

    #[tokio::test]
    async fn test_search_by_fragment_returns_first_match() {
        let directory = seeded_directory();

        // "06" prefixes every seeded phone
        let found = directory.search_by_phone("06").await.unwrap();
        assert_eq!(found.id, UserId(1));

        let found = directory.search_by_phone("4321").await.unwrap();
        assert_eq!(found.name, "Karim Idrissi");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let directory = seeded_directory();

        assert_eq!(directory.get_by_id(UserId(2)).await.unwrap().name, "Fatima Benali");
        assert!(directory.get_by_id(UserId(42)).await.is_none());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let directory = seeded_directory();

        let created = directory.create(NewUser::named("New", "000")).await;
        let fetched = directory.get_by_id(created.id).await.unwrap();

        assert_eq!(created.id, UserId(4));
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, UserStatus::Active);
        assert!(fetched.transactions.is_empty());
        assert_eq!(fetched.registered_on, NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        assert_eq!(directory.list_all().await.last().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_create_ids_are_unique_and_increasing() {
        let directory = UserDirectory::new(
            Arc::new(InMemoryUserStore::default()),
            Arc::new(NoDelay),
            clock(),
            Latency::default(),
        );

        let first = directory.create(NewUser::default()).await;
        let second = directory.create(NewUser::default()).await;

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
        assert_eq!(directory.list_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let directory = seeded_directory();

        let updated = directory
            .update(
                UserId(1),
                UserPatch {
                    email: Some("m.alami@example.com".to_string()),
                    balance: Some(Decimal::new(99, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, UserId(1));
        assert_eq!(updated.name, "Mohammed Alami");
        assert_eq!(updated.email, "m.alami@example.com");
        assert_eq!(updated.balance, Decimal::new(99, 0));
        assert_eq!(updated.transactions.len(), 3);
        assert_eq!(directory.get_by_id(UserId(1)).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let directory = seeded_directory();

        let result = directory.update(UserId(7), UserPatch::default()).await;

        assert!(result.is_none());
        assert_eq!(directory.list_all().await.len(), 3);
    }

    #[tokio::test]
    async fn test_toggle_status_twice_restores() {
        let directory = seeded_directory();

        let blocked = directory.toggle_status(UserId(1)).await.unwrap();
        assert_eq!(blocked.status, UserStatus::Blocked);
        assert_eq!(directory.statistics().await.blocked_users, 2);

        let restored = directory.toggle_status(UserId(1)).await.unwrap();
        assert_eq!(restored.status, UserStatus::Active);
        assert!(directory.toggle_status(UserId(10)).await.is_none());
    }

    #[tokio::test]
    async fn test_total_users_matches_list_length() {
        let directory = seeded_directory();
        directory.create(NewUser::named("Other", "0700000000")).await;

        let stats = directory.statistics().await;
        assert_eq!(stats.total_users, directory.list_all().await.len());
        assert_eq!(stats.active_users + stats.blocked_users, stats.total_users);
    }

    #[tokio::test]
    async fn test_each_call_waits_its_latency() {
        let delay = Arc::new(RecordingDelay::default());
        let directory = UserDirectory::new(
            Arc::new(InMemoryUserStore::new(seed::seed_users())),
            delay.clone(),
            clock(),
            Latency::default(),
        );

        directory.search_by_phone("0612").await;
        directory.toggle_status(UserId(1)).await;
        directory.list_all().await;

        assert_eq!(
            delay.requested(),
            vec![
                Duration::from_millis(500),
                Duration::from_millis(300),
                Duration::from_millis(500),
            ]
        );
    }
}
