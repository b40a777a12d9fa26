use crate::TestContext;

pub mod data;
pub mod factory;

impl TestContext {
    pub fn news<'a>(&'a mut self) -> NewsFixtures<'a> {
        NewsFixtures { setup: self }
    }
}

pub struct NewsFixtures<'a> {
    pub setup: &'a mut TestContext,
}
