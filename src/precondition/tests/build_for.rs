//! Tests for PreconditionBuilder::build_for method.

use super::*;

/// Tests building the full graph of a news-tag association through the database.
///
/// Expected: Ok with every role present and foreign keys pointing at the created parents
#[tokio::test]
async fn builds_dependency_graph_in_order() -> Result<(), TestError> {
    let test = TestBuilder::new().with_news_tables().build().await?;
    let mut harness = test.harness();

    let preconditions = harness
        .preconditions()
        .build_for(EntityKind::NewsTagParam, &EntityRecord::new())
        .await
        .unwrap();

    let roles: Vec<_> = preconditions.roles().copied().collect();
    assert_eq!(roles.len(), 4);

    let news = preconditions.get("newsData").unwrap();
    let param = preconditions.get("newsTagParamData").unwrap();
    assert_eq!(
        news.get("newsTypeId").and_then(|v| v.as_i64()),
        preconditions.id_of(EntityKind::NewsType)
    );
    assert_eq!(param.get("newsId").and_then(|v| v.as_i64()), news.id());
    assert_eq!(
        param.get("tagId").and_then(|v| v.as_i64()),
        preconditions.id_of(EntityKind::Tag)
    );

    Ok(())
}

/// Tests that created entities are registered and visible in the database.
///
/// Expected: Ok, fixture store holds each record and the rows exist
#[tokio::test]
async fn registers_fixtures_and_rows() -> Result<(), TestError> {
    let test = TestBuilder::new().with_news_tables().build().await?;
    let mut harness = test.harness();

    let preconditions = harness
        .preconditions()
        .build_for(
            EntityKind::Comment,
            &EntityRecord::from([("body", json!("first comment"))]),
        )
        .await
        .unwrap();

    let comment_id = preconditions.id_of(EntityKind::Comment).unwrap();
    assert_eq!(harness.fixtures.len(), 3);
    assert_eq!(
        harness
            .fixtures
            .lookup(EntityKind::Comment, comment_id)
            .and_then(|record| record.get("body")),
        Some(&json!("first comment"))
    );

    harness
        .verifier
        .assert_present(
            EntityKind::Comment,
            &EntityRecord::from([("id", json!(comment_id)), ("body", json!("first comment"))]),
        )
        .await
        .unwrap();

    Ok(())
}

/// Tests creating a tag through the API channel.
///
/// Expected: Ok with the record returned by the API, sent with the bearer token
#[tokio::test]
async fn creates_leaf_through_api() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let tag = test.news().mock_tag(9);
    let mock = test.api().create_authenticated_endpoint(
        "CREATE",
        "tag",
        200,
        factory::success_envelope(factory::tag_json(&tag)),
        1,
    );
    test.register_mock(mock);
    let mut harness = test.harness();

    let preconditions = harness
        .preconditions_via(SetupChannel::Api)
        .build_for(EntityKind::Tag, &EntityRecord::from([("name", json!("Tag 9"))]))
        .await
        .unwrap();

    assert_eq!(preconditions.id_of(EntityKind::Tag), Some(9));
    assert!(!harness.client.is_authenticated());
    test.assert_mocks();

    Ok(())
}

/// Tests the API rejecting valid setup.
///
/// Expected: Err(PreconditionError::Rejected) naming the role
#[tokio::test]
async fn reports_rejected_setup() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint(
            "CREATE",
            "tag",
            500,
            factory::error_envelope(500, "Internal error", json!({})),
            1,
        )
        .build()
        .await?;
    let mut harness = test.harness();

    let result = harness
        .preconditions_via(SetupChannel::Api)
        .build_for(EntityKind::Tag, &EntityRecord::new())
        .await;

    match result {
        Err(Error::PreconditionError(PreconditionError::Rejected { role, status, .. })) => {
            assert_eq!(role, "tagData");
            assert_eq!(status, 500);
        }
        other => panic!("expected rejected precondition, got {:?}", other),
    }
    test.assert_mocks();

    Ok(())
}

/// Tests a database failure while creating a dependency.
///
/// Expected: Err(PreconditionError::Setup) naming the failing role, fatal for the run
#[tokio::test]
async fn wraps_database_failures() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Tag)
        .build()
        .await?;
    let mut harness = test.harness();

    let result = harness
        .preconditions()
        .build_for(EntityKind::Comment, &EntityRecord::new())
        .await;

    match result {
        Err(err @ Error::PreconditionError(PreconditionError::Setup { role, .. })) => {
            assert_eq!(role, "newsTypeData");
            assert!(err.is_fatal());
        }
        other => panic!("expected setup failure, got {:?}", other),
    }

    Ok(())
}
