use chrono::{Duration, Utc};
use deck_share::storage::models::{PresentationRecord, Year};
use deck_share::storage::Database;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn sample_presentation(id: &str, year: Year, title: &str) -> PresentationRecord {
    let file_name = format!("R{id}_{title}.pptx");
    let file_path = format!("{}/{file_name}", year.label());
    PresentationRecord {
        id: id.to_string(),
        name: "Test Student".to_string(),
        roll_number: format!("R{id}"),
        title: title.to_string(),
        year,
        file_url: format!("http://localhost:8080/files/{file_path}"),
        file_name,
        file_path,
        mime_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            .to_string(),
        byte_size: 1024,
        created_at: Utc::now(),
    }
}

#[test]
fn test_put_and_get_presentation() {
    let (_dir, db) = test_db();
    let record = sample_presentation("1", Year::Second, "My_Talk_");

    db.put_presentation(&record).unwrap();

    let retrieved = db
        .get_presentation("1")
        .unwrap()
        .expect("record should exist");
    assert_eq!(retrieved.id, "1");
    assert_eq!(retrieved.roll_number, "R1");
    assert_eq!(retrieved.year, Year::Second);
    assert_eq!(retrieved.file_path, "2nd Year/R1_My_Talk_.pptx");
}

#[test]
fn test_get_presentation_by_path() {
    let (_dir, db) = test_db();
    let record = sample_presentation("2", Year::First, "Intro");
    db.put_presentation(&record).unwrap();

    let retrieved = db
        .get_presentation_by_path("1st Year/R2_Intro.pptx")
        .unwrap()
        .expect("record should exist");
    assert_eq!(retrieved.id, "2");
}

#[test]
fn test_get_presentation_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_presentation("nonexistent").unwrap().is_none());
    assert!(db
        .get_presentation_by_path("4th Year/missing.pptx")
        .unwrap()
        .is_none());
}

#[test]
fn test_path_exists() {
    let (_dir, db) = test_db();
    assert!(!db.path_exists("3rd Year/R9_Dup.pptx").unwrap());

    db.put_presentation(&sample_presentation("9", Year::Third, "Dup"))
        .unwrap();
    assert!(db.path_exists("3rd Year/R9_Dup.pptx").unwrap());
}

#[test]
fn test_list_presentations_newest_first() {
    let (_dir, db) = test_db();
    let now = Utc::now();

    let mut oldest = sample_presentation("a", Year::First, "Oldest");
    oldest.created_at = now - Duration::hours(2);
    let mut middle = sample_presentation("b", Year::Second, "Middle");
    middle.created_at = now - Duration::hours(1);
    let mut newest = sample_presentation("c", Year::First, "Newest");
    newest.created_at = now;

    // Insert out of order
    db.put_presentation(&middle).unwrap();
    db.put_presentation(&newest).unwrap();
    db.put_presentation(&oldest).unwrap();

    let all = db.list_presentations().unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
}

#[test]
fn test_list_by_year() {
    let (_dir, db) = test_db();
    let now = Utc::now();

    let mut first = sample_presentation("a", Year::Second, "First");
    first.created_at = now - Duration::minutes(5);
    let mut second = sample_presentation("b", Year::Second, "Second");
    second.created_at = now;
    let other = sample_presentation("c", Year::Fourth, "Other");

    db.put_presentation(&first).unwrap();
    db.put_presentation(&second).unwrap();
    db.put_presentation(&other).unwrap();

    let second_year = db.list_by_year(Year::Second).unwrap();
    let ids: Vec<&str> = second_year.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    assert_eq!(db.list_by_year(Year::Fourth).unwrap().len(), 1);
    assert!(db.list_by_year(Year::Third).unwrap().is_empty());
}

#[test]
fn test_delete_by_year() {
    let (_dir, db) = test_db();

    db.put_presentation(&sample_presentation("a", Year::Third, "One"))
        .unwrap();
    db.put_presentation(&sample_presentation("b", Year::Third, "Two"))
        .unwrap();
    db.put_presentation(&sample_presentation("c", Year::First, "Keep"))
        .unwrap();

    let deleted = db.delete_by_year(Year::Third).unwrap();
    assert_eq!(deleted.len(), 2);
    let mut paths: Vec<&str> = deleted.iter().map(|r| r.file_path.as_str()).collect();
    paths.sort();
    assert_eq!(paths, vec!["3rd Year/Ra_One.pptx", "3rd Year/Rb_Two.pptx"]);

    // Rows, path index, and year index are all gone
    assert!(db.get_presentation("a").unwrap().is_none());
    assert!(db.get_presentation("b").unwrap().is_none());
    assert!(!db.path_exists("3rd Year/Ra_One.pptx").unwrap());
    assert!(db.list_by_year(Year::Third).unwrap().is_empty());

    // Other years untouched
    assert!(db.get_presentation("c").unwrap().is_some());
    assert_eq!(db.list_by_year(Year::First).unwrap().len(), 1);
}

#[test]
fn test_delete_by_year_empty() {
    let (_dir, db) = test_db();
    let deleted = db.delete_by_year(Year::Fourth).unwrap();
    assert!(deleted.is_empty());
}

#[test]
fn test_purge_all() {
    let (_dir, db) = test_db();

    db.put_presentation(&sample_presentation("a", Year::First, "One"))
        .unwrap();
    db.put_presentation(&sample_presentation("b", Year::Second, "Two"))
        .unwrap();

    let stats = db.purge_all().unwrap();
    assert_eq!(stats.presentations, 2);

    assert!(db.list_presentations().unwrap().is_empty());
    assert!(!db.path_exists("1st Year/Ra_One.pptx").unwrap());
    assert!(db.list_by_year(Year::Second).unwrap().is_empty());
}
