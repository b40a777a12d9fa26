//! Runs the unauthenticated scenarios of the catalog against a mock API.

use super::*;

/// Tests the four anonymous scenarios of each resource against an API forbidding them.
///
/// Expected: Ok with every scenario passed
#[tokio::test]
async fn anonymous_requests_are_forbidden() -> Result<(), TestError> {
    for kind in [EntityKind::Tag, EntityKind::Comment, EntityKind::NewsTagParam] {
        let mut test = TestBuilder::new().with_news_tables().build().await?;
        let mock = test
            .api()
            .create_forbidden_resource(kind.resource().unwrap(), 4);
        test.register_mock(mock);
        let mut harness = test.harness();

        let scenarios: Vec<_> = catalog::for_kind(kind)
            .into_iter()
            .filter(|s| !s.authenticated)
            .collect();
        assert_eq!(scenarios.len(), 4);

        let report = runner::run(&mut harness, &scenarios).await.unwrap();

        assert!(report.is_success(), "{}", report);
        test.assert_mocks();
    }

    Ok(())
}

/// Tests an API that lets anonymous creates through.
///
/// Expected: Ok with only the create scenario reported as failed
#[tokio::test]
async fn anonymous_create_accepted_is_reported() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let body = factory::success_envelope(factory::tag_json(&test.news().mock_tag(1)));
    let create = test.api().create_endpoint("CREATE", "tag", 200, body, 1);
    let forbidden = test.api().create_forbidden_resource("tag", 3);
    test.register_mock(create);
    test.register_mock(forbidden);
    let mut harness = test.harness();

    let scenarios: Vec<_> = catalog::for_kind(EntityKind::Tag)
        .into_iter()
        .filter(|s| !s.authenticated)
        .collect();

    let report = runner::run(&mut harness, &scenarios).await.unwrap();

    assert_eq!(report.failed(), 1);
    let failure = report.failures().next().unwrap();
    let scenario = scenarios.iter().find(|s| s.name == failure.name).unwrap();
    assert_eq!(scenario.action, Action::Create);
    assert_eq!(scenario.outcome, Outcome::Forbidden);
    test.assert_mocks();

    Ok(())
}
