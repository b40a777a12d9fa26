//! Tests for DatabaseVerifier::assert_present and assert_absent methods.

use super::*;

/// Tests presence assertions against an existing row.
///
/// Expected: assert_present passes, assert_absent fails with a table snapshot
#[tokio::test]
async fn existing_row_is_present() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_mock_tag(1)
        .build()
        .await?;
    let verifier = verifier(&test);
    let criteria = EntityRecord::from([("id", json!(1))]);

    assert!(verifier.assert_present(EntityKind::Tag, &criteria).await.is_ok());

    let result = verifier.assert_absent(EntityKind::Tag, &criteria).await;
    match result {
        Err(Error::AssertionError(AssertionError::RowPresence {
            table,
            found,
            snapshot,
            ..
        })) => {
            assert_eq!(table, "tag");
            assert_eq!(found, 1);
            assert!(snapshot.contains("\"id\":1"));
        }
        other => panic!("expected row presence failure, got {:?}", other),
    }

    Ok(())
}

/// Tests presence assertions against a missing row.
///
/// Expected: assert_absent passes, assert_present fails
#[tokio::test]
async fn missing_row_is_absent() -> Result<(), TestError> {
    let test = TestBuilder::new().with_news_tables().build().await?;
    let verifier = verifier(&test);
    let criteria = EntityRecord::from([("id", json!(1))]);

    assert!(verifier.assert_absent(EntityKind::Tag, &criteria).await.is_ok());
    assert!(matches!(
        verifier.assert_present(EntityKind::Tag, &criteria).await,
        Err(Error::AssertionError(AssertionError::RowPresence { found: 0, .. }))
    ));

    Ok(())
}
