mod catalog;
mod util;

pub use util::test_utils::TestContextExt;
