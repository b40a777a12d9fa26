//! Tests for the run_scenario function.

use super::*;

fn anonymous_create() -> Scenario {
    Scenario::new(EntityKind::Tag, Action::Create, BoundaryClass::Unauthenticated)
        .anonymous()
        .expect(403, Outcome::Forbidden)
        .named("tag create unauthenticated")
}

/// Tests an anonymous create answered with the forbidden envelope.
///
/// Expected: Ok, nothing was written
#[tokio::test]
async fn passes_forbidden_create() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_forbidden_endpoint("CREATE", "tag", 1)
        .build()
        .await?;
    let mut harness = test.harness();

    let result = run_scenario(&mut harness, &anonymous_create()).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests an anonymous create the API accepts.
///
/// Expected: Err with the status assertion naming 403
#[tokio::test]
async fn fails_when_anonymous_create_succeeds() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let body = factory::success_envelope(factory::tag_json(&test.news().mock_tag(1)));
    let mock = test.api().create_endpoint("CREATE", "tag", 200, body, 1);
    test.register_mock(mock);
    let mut harness = test.harness();

    let result = run_scenario(&mut harness, &anonymous_create()).await;

    assert!(matches!(
        result,
        Err(Error::AssertionError(AssertionError::Status {
            expected: 403,
            actual: 200,
            ..
        }))
    ));
    test.assert_mocks();

    Ok(())
}

/// Tests reading the precondition tag back.
///
/// Expected: Ok, the response matches the seeded row apart from timestamps
#[tokio::test]
async fn passes_read_of_precondition() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint(
            "GET",
            "tag/1",
            200,
            factory::success_envelope(json!({
                "id": 1,
                "name": "Test",
                "createDate": TEST_TIMESTAMP,
                "creatorId": null,
                "updateDate": TEST_TIMESTAMP,
                "updaterId": null
            })),
            1,
        )
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Read, BoundaryClass::Valid)
        .seed(EntityRecord::from([("name", json!("Test"))]))
        .expect(200, Outcome::Read)
        .named("tag read valid");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a read whose response differs from the stored row.
///
/// Expected: Err with a content assertion on `$.data.name`
#[tokio::test]
async fn fails_read_with_wrong_content() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint(
            "GET",
            "tag/1",
            200,
            factory::success_envelope(json!({
                "id": 1,
                "name": "Other",
                "createDate": TEST_TIMESTAMP,
                "creatorId": null,
                "updateDate": TEST_TIMESTAMP,
                "updaterId": null
            })),
            1,
        )
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Read, BoundaryClass::Valid)
        .seed(EntityRecord::from([("name", json!("Test"))]))
        .expect(200, Outcome::Read)
        .named("tag read valid");

    let result = run_scenario(&mut harness, &scenario).await;

    match result {
        Err(Error::AssertionError(AssertionError::Content { path, .. })) => {
            assert_eq!(path, "$.data.name")
        }
        other => panic!("expected content assertion, got {:?}", other),
    }

    Ok(())
}

/// Tests a create whose echoed record is the stored row.
///
/// Expected: Ok and the record is registered as fixture
#[tokio::test]
async fn passes_persisted_create() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_news_tables()
        .with_mock_tag(1)
        .build()
        .await?;
    let body = factory::success_envelope(factory::tag_json(&test.news().mock_tag(1)));
    let mock = test
        .api()
        .create_authenticated_endpoint("CREATE", "tag", 200, body, 1);
    test.register_mock(mock);
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Create, BoundaryClass::Valid)
        .field("name", Input::Literal(json!("Tag 1")))
        .named("tag create name valid");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(result.is_ok(), "{:?}", result);
    assert!(harness.fixtures.lookup(EntityKind::Tag, 1).is_some());
    test.assert_mocks();

    Ok(())
}

/// Tests deleting an id no row has.
///
/// Expected: Ok, the API reports success and the table is untouched
#[tokio::test]
async fn passes_idempotent_delete_of_missing_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_mock_tag(1)
        .with_mock_tag(2)
        .with_endpoint("DELETE", "tag/3", 200, factory::delete_success(), 1)
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Delete, BoundaryClass::MissingTarget)
        .target(Target::Missing)
        .expect(200, Outcome::DeletedIdempotent)
        .named("tag delete missing target");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a delete the API acknowledges without removing the row.
///
/// Expected: Err with a row presence assertion
#[tokio::test]
async fn fails_delete_that_leaves_row() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint("DELETE", "tag/1", 200, factory::delete_success(), 1)
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Delete, BoundaryClass::Valid)
        .expect(200, Outcome::Deleted)
        .named("tag delete valid");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(matches!(
        result,
        Err(Error::AssertionError(AssertionError::RowPresence { found: 1, .. }))
    ));

    Ok(())
}

/// Tests a validation failure carrying the expected field message.
///
/// Expected: Ok, the comment table is unchanged
#[tokio::test]
async fn passes_field_error_with_message() -> Result<(), TestError> {
    let message = "Значение «Body» должно содержать максимум 65 535 символов.";
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint(
            "CREATE",
            "comment",
            400,
            factory::field_error_envelope("body", message),
            1,
        )
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Comment, Action::Create, BoundaryClass::OverMaxLength)
        .field("body", Input::Literal(json!("x")))
        .expect(
            400,
            Outcome::FieldError {
                field: "body",
                message: Some(message.to_string()),
            },
        )
        .named("comment create body over max length");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a rejected request answered with a success envelope.
///
/// Expected: Err with an envelope assertion
#[tokio::test]
async fn fails_rejection_without_errors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint("CREATE", "tag", 400, factory::success_envelope(json!([])), 1)
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Create, BoundaryClass::Empty)
        .field("name", Input::Literal(json!("")))
        .expect(400, Outcome::Rejected)
        .named("tag create name empty");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(matches!(
        result,
        Err(Error::AssertionError(AssertionError::Envelope { .. }))
    ));

    Ok(())
}

/// Tests the second page of five tags.
///
/// Expected: Ok, ids 3 and 4 with more rows after them
#[tokio::test]
async fn passes_pagination_page() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let list = vec![
        factory::tag_json(&test.news().mock_tag(3)),
        factory::tag_json(&test.news().mock_tag(4)),
    ];
    let mock = test
        .api()
        .create_endpoint("GET", "tag", 200, factory::page(list, true), 1);
    test.register_mock(mock);
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::List, BoundaryClass::Pagination)
        .expect(200, Outcome::Page { offset: 2, limit: 2 })
        .named("tag list offset 2 limit 2");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests the last page reported as having more rows.
///
/// Expected: Err with a content assertion on `$.data.more`
#[tokio::test]
async fn fails_pagination_with_wrong_more_flag() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let list = vec![factory::tag_json(&test.news().mock_tag(5))];
    let mock = test
        .api()
        .create_endpoint("GET", "tag", 200, factory::page(list, true), 1);
    test.register_mock(mock);
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::List, BoundaryClass::Pagination)
        .expect(200, Outcome::Page { offset: 4, limit: 2 })
        .named("tag list offset 4 limit 2");

    let result = run_scenario(&mut harness, &scenario).await;

    match result {
        Err(Error::AssertionError(AssertionError::Content { path, .. })) => {
            assert_eq!(path, "$.data.more")
        }
        other => panic!("expected content assertion, got {:?}", other),
    }

    Ok(())
}

/// Tests a delete answered with `{success: false}`.
///
/// Expected: Err with a content assertion on `$.data.success`
#[tokio::test]
async fn fails_delete_reporting_no_success() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_endpoint(
            "DELETE",
            "tag/1",
            200,
            factory::success_envelope(json!({ "success": false })),
            1,
        )
        .build()
        .await?;
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Tag, Action::Delete, BoundaryClass::Valid)
        .expect(200, Outcome::Deleted)
        .named("tag delete valid");

    let result = run_scenario(&mut harness, &scenario).await;

    match result {
        Err(Error::AssertionError(AssertionError::Content { path, .. })) => {
            assert_eq!(path, "$.data.success")
        }
        other => panic!("expected content assertion, got {:?}", other),
    }

    Ok(())
}

fn filter_composition() -> Scenario {
    Scenario::new(EntityKind::Comment, Action::List, BoundaryClass::Filter)
        .expect(200, Outcome::FilterComposition)
        .named("comment list newsId and body filters compose")
}

/// Register the three list calls of the filter composition check.
///
/// Comments are seeded as 1 (alpha, news 1), 2 (beta, news 1) and 3 (alpha, news 3).
fn mock_comment_filters(test: &mut TestContext, both: &[(i32, i32)]) {
    let page = |test: &mut TestContext, ids: &[(i32, i32)]| -> Value {
        let list = ids
            .iter()
            .map(|(id, news_id)| factory::comment_json(&test.news().mock_comment(*id, *news_id)))
            .collect();
        factory::page(list, false)
    };

    let by_both = page(test, both);
    let by_news = page(test, &[(1, 1), (2, 1)]);
    let by_body = page(test, &[(1, 1), (3, 3)]);

    let news_filter = json!({ "filter": { "newsId": 1 } });
    let mocks = [
        test.api().create_matching_endpoint(
            "GET",
            "comment",
            Matcher::AllOf(vec![
                Matcher::PartialJson(news_filter.clone()),
                Matcher::Regex("alpha".to_string()),
            ]),
            200,
            by_both,
            1,
        ),
        test.api().create_matching_endpoint(
            "GET",
            "comment",
            Matcher::PartialJson(news_filter),
            200,
            by_news,
            1,
        ),
        test.api().create_matching_endpoint(
            "GET",
            "comment",
            Matcher::Regex("alpha".to_string()),
            200,
            by_body,
            1,
        ),
    ];
    for mock in mocks {
        test.register_mock(mock);
    }
}

/// Tests an API returning the intersection for combined filters.
///
/// Expected: Ok
#[tokio::test]
async fn passes_filter_composition() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    mock_comment_filters(&mut test, &[(1, 1)]);
    let mut harness = test.harness();

    let result = run_scenario(&mut harness, &filter_composition()).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests an API ignoring `body` when `newsId` is set.
///
/// Expected: Err with a mismatch listing both comments of news 1
#[tokio::test]
async fn fails_filter_composition_ignoring_body() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    mock_comment_filters(&mut test, &[(1, 1), (2, 1)]);
    let mut harness = test.harness();

    let result = run_scenario(&mut harness, &filter_composition()).await;

    match result {
        Err(Error::AssertionError(AssertionError::Mismatch { actual, .. })) => {
            assert_eq!(actual, "{1, 2}")
        }
        other => panic!("expected mismatch, got {:?}", other),
    }
    test.assert_mocks();

    Ok(())
}

/// Tests a comment create referencing a news id no row has.
///
/// Expected: Ok, the request carried the missing id and no comment was written
#[tokio::test]
async fn passes_rejected_missing_reference() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let mock = test.api().create_matching_endpoint(
        "CREATE",
        "comment",
        Matcher::PartialJson(json!({ "newsId": 2 })),
        400,
        factory::field_error_envelope("newsId", "Новость не найдена"),
        1,
    );
    test.register_mock(mock);
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::Comment, Action::Create, BoundaryClass::MissingReference)
        .field("newsId", Input::MissingId(EntityKind::News))
        .expect(400, Outcome::Rejected)
        .named("comment create newsId missing reference");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(
        harness
            .verifier
            .count_rows(EntityKind::Comment, &EntityRecord::new())
            .await
            .unwrap(),
        0
    );
    test.assert_mocks();

    Ok(())
}

/// Tests a comment create referencing the precondition news item that the API rejects.
///
/// Expected: Err with the status assertion, after sending the precondition id
#[tokio::test]
async fn fails_rejected_existing_reference() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let mock = test.api().create_matching_endpoint(
        "CREATE",
        "comment",
        Matcher::PartialJson(json!({ "newsId": 1 })),
        400,
        factory::field_error_envelope("newsId", "Новость не найдена"),
        1,
    );
    test.register_mock(mock);
    let mut harness = test.harness();
    let scenario =
        Scenario::new(EntityKind::Comment, Action::Create, BoundaryClass::ExistingReference)
            .field("newsId", Input::PreconditionId(EntityKind::News))
            .named("comment create newsId existing reference");

    let result = run_scenario(&mut harness, &scenario).await;

    assert!(matches!(
        result,
        Err(Error::AssertionError(AssertionError::Status {
            expected: 200,
            actual: 400,
            ..
        }))
    ));
    test.assert_mocks();

    Ok(())
}

/// Tests re-pointing a news-tag association at a new tag that the API echoes but never
/// stores.
///
/// Expected: Err with a row content assertion on `tagId`, new tag 2 against stored tag 1
#[tokio::test]
async fn fails_update_to_fresh_tag_not_persisted() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_news_tables().build().await?;
    let echoed = factory::news_tag_param_json(&test.news().mock_news_tag_param(1, 1, 2));
    let mock = test.api().create_matching_endpoint(
        "PUT",
        "news-tag-param/1",
        Matcher::PartialJson(json!({ "newsId": 1, "tagId": 2 })),
        200,
        factory::success_envelope(echoed),
        1,
    );
    test.register_mock(mock);
    let mut harness = test.harness();
    let scenario = Scenario::new(EntityKind::NewsTagParam, Action::Update, BoundaryClass::Valid)
        .field("tagId", Input::Fresh(EntityKind::Tag))
        .named("news-tag-param update tagId valid");

    let result = run_scenario(&mut harness, &scenario).await;

    match result {
        Err(Error::AssertionError(AssertionError::RowContent {
            field,
            expected,
            actual,
            ..
        })) => {
            assert_eq!(field, "tagId");
            assert_eq!(expected, "2");
            assert_eq!(actual, "1");
        }
        other => panic!("expected row content assertion, got {:?}", other),
    }
    assert_eq!(
        harness
            .verifier
            .count_rows(EntityKind::Tag, &EntityRecord::new())
            .await
            .unwrap(),
        2
    );
    test.assert_mocks();

    Ok(())
}
