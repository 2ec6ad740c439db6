/*!
 * Tests for directory resolution of candidate entries
 */

use logbatch::directory::snapshot::DirectorySnapshot;
use logbatch::directory::{NamedRef, Squad};
use logbatch::entry::{FieldEdit, FieldTag};
use logbatch::errors::FieldError;
use logbatch::resolver::DirectoryResolver;

use crate::common::{sample_candidate, standard_snapshot};

#[test]
fn test_resolve_withKnownNames_shouldFillIdsAndCanonicalize() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    entry.squad_name = "alpha".to_string();
    entry.person_name = "JANE DOE".to_string();
    entry.log_type_name = " daily ".to_string();

    resolver.resolve(&mut entry, &snapshot).expect("entry should resolve");

    assert_eq!(entry.squad_id, Some(1));
    assert_eq!(entry.person_id, Some(9));
    assert_eq!(entry.log_type_id, Some(2));
    assert_eq!(entry.category_ids, Some(vec![5, 6]));
    // Display names are rewritten to the directory spelling
    assert_eq!(entry.squad_name, "Alpha");
    assert_eq!(entry.person_name, "Jane Doe");
    assert_eq!(entry.log_type_name, "Daily");
    assert!(entry.is_resolved());
    // Resolution never marks fields as edited
    assert!(entry.edited_fields.is_empty());
}

#[test]
fn test_resolve_withUnknownSquad_shouldReportOnlySquad() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    entry.squad_name = "Beta".to_string();

    let errors = resolver.resolve(&mut entry, &snapshot).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 1: squad 'Beta' not found");
    assert!(entry.squad_id.is_none());
}

#[test]
fn test_resolve_withPersonFromOtherSquad_shouldNotMatch() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    // Ana Lima exists, but in squad Gamma, and person lookup is squad-scoped
    entry.person_name = "Ana Lima".to_string();

    let errors = resolver.resolve(&mut entry, &snapshot).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 1: person 'Ana Lima' not found");
    // The squad still resolved; only the person is pending
    assert_eq!(entry.squad_id, Some(1));
}

#[test]
fn test_resolve_withTeamSentinel_shouldMarkWholeSquad() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    entry.person_name = "all".to_string();

    resolver.resolve(&mut entry, &snapshot).expect("entry should resolve");

    assert!(entry.for_whole_squad);
    assert!(entry.person_id.is_none());
    assert!(entry.is_resolved());
}

#[test]
fn test_resolve_withPendingDateError_shouldReportInvalidDate() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    entry.start_date = None;
    entry.date_error = Some("31-13-2025".to_string());

    let errors = resolver.resolve(&mut entry, &snapshot).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], FieldError::InvalidDate { .. }));
    assert_eq!(
        errors[0].to_string(),
        "line 1: date '31-13-2025' is not a valid dd-mm-yyyy date"
    );
}

#[test]
fn test_resolve_withSeveralBadFields_shouldCollectThemAll() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    entry.log_type_name = "Weekly".to_string();
    entry.category_names = vec!["Backend".to_string(), "Design".to_string()];

    let errors = resolver.resolve(&mut entry, &snapshot).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "line 1: type 'Weekly' not found");
    assert_eq!(errors[1].to_string(), "line 1: category 'Design' not found");
    // No partial id list when any category failed
    assert!(entry.category_ids.is_none());
}

#[test]
fn test_resolve_withAmbiguousName_shouldRejectNotGuess() {
    let resolver = DirectoryResolver::default();
    let snapshot = DirectorySnapshot::new(
        vec![Squad {
            id: 1,
            name: "Alpha".to_string(),
            members: vec![NamedRef {
                id: 9,
                name: "Jane Doe".to_string(),
            }],
        }],
        vec![NamedRef {
            id: 2,
            name: "Daily".to_string(),
        }],
        vec![
            NamedRef {
                id: 5,
                name: "Backend".to_string(),
            },
            NamedRef {
                id: 8,
                name: "BACKEND".to_string(),
            },
        ],
    );
    let mut entry = sample_candidate();
    entry.category_names = vec!["backend".to_string()];

    let errors = resolver.resolve(&mut entry, &snapshot).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 1: category 'backend' is ambiguous");
}

#[test]
fn test_resolveField_withTypeEdit_shouldLeaveOtherFieldsAlone() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    resolver.resolve(&mut entry, &snapshot).expect("entry should resolve");

    entry.apply_edit(FieldEdit::Type("Incident".to_string()));
    resolver
        .resolve_field(&mut entry, FieldTag::Type, &snapshot)
        .expect("type should resolve");

    assert_eq!(entry.log_type_id, Some(4));
    assert_eq!(entry.log_type_name, "Incident");
    // Untouched fields keep their earlier resolution
    assert_eq!(entry.squad_id, Some(1));
    assert_eq!(entry.person_id, Some(9));
}

#[test]
fn test_resolveField_withSquadEdit_shouldRescopeThePerson() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    resolver.resolve(&mut entry, &snapshot).expect("entry should resolve");

    entry.apply_edit(FieldEdit::Squad("Gamma".to_string()));
    let errors = resolver
        .resolve_field(&mut entry, FieldTag::Squad, &snapshot)
        .unwrap_err();

    // The squad resolves, but Jane Doe is not on Gamma's roster
    assert_eq!(entry.squad_id, Some(3));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 1: person 'Jane Doe' not found");
}

#[test]
fn test_resolveField_withDescriptionEdit_shouldNeedNoResolution() {
    let resolver = DirectoryResolver::default();
    let snapshot = standard_snapshot();
    let mut entry = sample_candidate();
    resolver.resolve(&mut entry, &snapshot).expect("entry should resolve");

    entry.apply_edit(FieldEdit::Description("rewritten".to_string()));
    resolver
        .resolve_field(&mut entry, FieldTag::Description, &snapshot)
        .expect("description needs no directory lookup");

    assert!(entry.is_resolved());
}
