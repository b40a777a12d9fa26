use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn api<'a>(&'a mut self) -> ApiFixtures<'a> {
        ApiFixtures { setup: self }
    }
}

pub struct ApiFixtures<'a> {
    pub setup: &'a mut TestContext,
}
