use herald::{config::Config, context::HarnessContext};
use herald_test_utils::{constant::TEST_AUTH_TOKEN, TestContext};

/// Extension trait for TestContext to point a harness at the mock API and test database
pub trait TestContextExt {
    fn harness(&self) -> HarnessContext;
}

impl TestContextExt for TestContext {
    fn harness(&self) -> HarnessContext {
        let config = Config::for_testing(self.server_url(), TEST_AUTH_TOKEN);

        HarnessContext::connect(self.db.clone(), &config)
            .expect("Failed to build harness context for test")
    }
}
