/*!
 * Tests for file utility functionality
 */

use wortfluss::file_utils::FileManager;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_fileExists_withExistingFile_shouldReturnTrue() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let file_path = create_test_file(&dir, "present.json", "[]").unwrap();

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(dir.join("absent.json")));
}

#[test]
fn test_writeToFile_withMissingParentDir_shouldCreateIt() {
    let temp_dir = create_temp_dir().unwrap();
    let nested = temp_dir.path().join("scrapes").join("Haus.json");

    FileManager::write_to_file(&nested, "{}").unwrap();

    assert_eq!(FileManager::read_to_string(&nested).unwrap(), "{}");
}

#[test]
fn test_readJsonOrNone_withValidJson_shouldParse() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let file_path = create_test_file(&dir, "words.json", r#"["Haus", "Baum"]"#).unwrap();

    let words: Option<Vec<String>> = FileManager::read_json_or_none(&file_path);
    assert_eq!(words, Some(vec!["Haus".to_string(), "Baum".to_string()]));
}

#[test]
fn test_readJsonOrNone_withCorruptJson_shouldReturnNone() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let file_path = create_test_file(&dir, "corrupt.json", "[1, 2").unwrap();

    let value: Option<Vec<u32>> = FileManager::read_json_or_none(&file_path);
    assert_eq!(value, None);
}

#[test]
fn test_readJsonOrNone_withMissingFile_shouldReturnNone() {
    let value: Option<Vec<u32>> = FileManager::read_json_or_none("no/such/file.json");
    assert_eq!(value, None);
}

#[test]
fn test_writeJson_thenReadJsonOrNone_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let file_path = temp_dir.path().join("queue.json");

    FileManager::write_json(&file_path, &vec!["Haus".to_string()]).unwrap();

    let words: Option<Vec<String>> = FileManager::read_json_or_none(&file_path);
    assert_eq!(words, Some(vec!["Haus".to_string()]));
}

#[test]
fn test_deleteFile_withMissingFile_shouldNotPanic() {
    let temp_dir = create_temp_dir().unwrap();
    FileManager::delete_file(temp_dir.path().join("absent.json"));
}

#[test]
fn test_deleteFile_withExistingFile_shouldRemoveIt() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let file_path = create_test_file(&dir, "spent.json", "{}").unwrap();

    FileManager::delete_file(&file_path);

    assert!(!FileManager::file_exists(&file_path));
}
