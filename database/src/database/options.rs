use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub seed: bool,
    pub request_timeout: Duration,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    /// Defines whether the database starts with the seed person (id "1", "Sam")
    pub fn set_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// How long a request manager waits for the database thread before giving up
    pub fn set_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            seed: true,
            request_timeout: Duration::from_secs(2),
        }
    }
}

impl DatabaseOptions {
    /// Empty database, used by tests and benchmarks that need a clean collection
    pub fn new_empty() -> Self {
        DatabaseOptions::default().set_seed(false)
    }
}
