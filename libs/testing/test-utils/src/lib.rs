//! Shared test utilities
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic, collision-free test data
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("alice");
//!     let email = builder.email("alice");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with a deterministic seed.
///
/// Values derived from different seeds never collide, so tests sharing one
/// database can use the unique `name`/`email` columns freely.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from a test name (seed = hash of the name).
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A unique user name, e.g. `user-12345-alice`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("alice"), "user-7-alice");
    /// ```
    pub fn name(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed, suffix)
    }

    /// A unique email address, e.g. `alice-12345@example.com`.
    pub fn email(&self, suffix: &str) -> String {
        format!("{}-{}@example.com", suffix, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `ids` is strictly increasing (storage never reuses ids)
    pub fn assert_strictly_increasing(ids: &[i32], context: &str) {
        for pair in ids.windows(2) {
            assert!(
                pair[0] < pair[1],
                "{}: ids not strictly increasing: {:?}",
                context,
                ids
            );
        }
    }
}
