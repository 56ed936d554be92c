/*!
 * Tests for language utility functionality
 */

use wortfluss::glossary::Direction;
use wortfluss::language_utils::{LanguagePair, get_language_name, validate_language_code};

#[test]
fn test_validateLanguageCode_withValidCodes_shouldSucceed() {
    assert!(validate_language_code("de").is_ok());
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code(" FR ").is_ok());
}

#[test]
fn test_validateLanguageCode_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("deu").is_err());
    assert!(validate_language_code("xx").is_err());
}

#[test]
fn test_getLanguageName_shouldResolveKnownCodes() {
    assert_eq!(get_language_name("de"), "German");
    assert_eq!(get_language_name("en"), "English");
    // Unknown codes fall back to the code itself
    assert_eq!(get_language_name("zz"), "zz");
}

#[test]
fn test_languagePair_withIdenticalCodes_shouldFail() {
    assert!(LanguagePair::new("de", "de").is_err());
    assert!(LanguagePair::new("de", "DE").is_err());
}

#[test]
fn test_languagePair_codesFor_shouldFollowDirection() {
    let pair = LanguagePair::new("de", "en").unwrap();

    assert_eq!(pair.codes_for(Direction::SourceToTarget), ("de", "en"));
    assert_eq!(pair.codes_for(Direction::TargetToSource), ("en", "de"));
}

#[test]
fn test_languagePair_shouldNormalizeCase() {
    let pair = LanguagePair::new("DE", "En").unwrap();

    assert_eq!(pair.source, "de");
    assert_eq!(pair.target, "en");
}
