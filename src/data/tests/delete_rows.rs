//! Tests for DatabaseVerifier::delete_rows method.

use super::*;

/// Tests deleting one row by id.
///
/// Expected: Ok(1) and only the other row remains
#[tokio::test]
async fn deletes_matching_rows() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_mock_tag(1)
        .with_mock_tag(2)
        .build()
        .await?;
    let verifier = verifier(&test);

    let deleted = verifier
        .delete_rows(EntityKind::Tag, &EntityRecord::from([("id", json!(1))]))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(
        verifier
            .count_rows(EntityKind::Tag, &EntityRecord::new())
            .await
            .unwrap(),
        1
    );

    Ok(())
}

/// Tests deleting an id that does not exist.
///
/// Expected: Ok(0)
#[tokio::test]
async fn deleting_missing_row_affects_nothing() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_news_tables()
        .with_mock_tag(1)
        .build()
        .await?;
    let verifier = verifier(&test);

    let deleted = verifier
        .delete_rows(EntityKind::Tag, &EntityRecord::from([("id", json!(7))]))
        .await
        .unwrap();
    assert_eq!(deleted, 0);

    Ok(())
}
