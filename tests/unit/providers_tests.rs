/*!
 * Tests for provider helper functionality
 */

use wortfluss::glossary::Direction;
use wortfluss::providers::{Translator, rowcol_to_a1};

use crate::common::mock_providers::MockTranslator;

#[test]
fn test_rowcolToA1_withSingleLetterColumns_shouldFormatCells() {
    assert_eq!(rowcol_to_a1(1, 1), "A1");
    assert_eq!(rowcol_to_a1(2, 3), "C2");
    assert_eq!(rowcol_to_a1(10, 26), "Z10");
}

#[test]
fn test_rowcolToA1_withMultiLetterColumns_shouldCarryOver() {
    assert_eq!(rowcol_to_a1(1, 27), "AA1");
    assert_eq!(rowcol_to_a1(5, 52), "AZ5");
    assert_eq!(rowcol_to_a1(3, 703), "AAA3");
}

#[tokio::test]
async fn test_mockTranslator_shouldRecordCallsInOrder() {
    let translator = MockTranslator::working().with_response("Haus", "house");

    let first = translator.translate("Haus", Direction::SourceToTarget).await.unwrap();
    let second = translator.translate("Baum", Direction::SourceToTarget).await.unwrap();

    assert_eq!(first, "house");
    assert_eq!(second, "Baum-translated");
    assert_eq!(
        translator.calls(),
        vec![
            ("Haus".to_string(), Direction::SourceToTarget),
            ("Baum".to_string(), Direction::SourceToTarget),
        ]
    );
}

#[tokio::test]
async fn test_mockTranslator_failingFor_shouldReturnError() {
    let translator = MockTranslator::working().failing_for("Haus");

    assert!(translator.translate("Haus", Direction::SourceToTarget).await.is_err());
    assert!(translator.translate("Baum", Direction::SourceToTarget).await.is_ok());
}
