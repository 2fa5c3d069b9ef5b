use uuid::Uuid;

use super::*;

#[test]
fn display_name_joins_and_trims() {
    assert_eq!(Student::new("Ana", "Lopez").display_name(), "Ana Lopez");
    assert_eq!(Student::new("Ana", "").display_name(), "Ana");
    assert_eq!(Student::new("", "Lopez").display_name(), "Lopez");
}

#[test]
fn student_decodes_camel_case() {
    let s: Student = serde_json::from_str(r#"{"firstName":"Ben","lastName":"Ode"}"#).unwrap();
    assert_eq!(s, Student::new("Ben", "Ode"));
}

#[test]
fn class_names_keep_roster_order() {
    let roster = vec![Student::new("Zed", "A"), Student::new("Ana", "B")];
    assert_eq!(class_names(&roster), vec!["Zed A".to_string(), "Ana B".to_string()]);
}

#[test]
fn parse_custom_trims_and_drops_blanks() {
    let names = parse_custom("  Ana \n\n Ben\r\n   \nCy");
    assert_eq!(names, vec!["Ana", "Ben", "Cy"]);
    assert!(parse_custom("").is_empty());
    assert!(parse_custom("\n \n").is_empty());
}

#[test]
fn resolve_picks_source_by_mode() {
    let class = vec!["Ana".to_string(), "Ben".to_string()];
    assert_eq!(resolve_students(RosterMode::Class, &class, Some("Cy")), class);
    assert_eq!(resolve_students(RosterMode::Custom, &class, Some("Cy\nDee")), vec!["Cy", "Dee"]);
    assert!(resolve_students(RosterMode::Custom, &class, None).is_empty());
}

#[test]
fn unassigned_filters_in_roster_order() {
    let students: Vec<String> = ["Cy", "Ana", "Ben"].iter().map(|s| (*s).to_string()).collect();
    let mut assignments = Assignments::new();
    assignments.insert("Ana".into(), Uuid::new_v4());
    assignments.insert("Ghost".into(), Uuid::new_v4());
    assert_eq!(unassigned(&students, &assignments), vec!["Cy", "Ben"]);
}
