/*!
 * Tests for free-text parsing into candidate entries
 */

use chrono::NaiveDate;
use logbatch::entry_parser::EntryParser;

use crate::common::SAMPLE_LINE;

#[test]
fn test_parse_withValidLine_shouldExtractAllFields() {
    let parser = EntryParser::default();
    let candidates = parser.parse(SAMPLE_LINE);

    assert_eq!(candidates.len(), 1);
    let entry = &candidates[0];
    assert_eq!(entry.squad_name, "Alpha");
    assert_eq!(entry.person_name, "Jane Doe");
    assert_eq!(entry.log_type_name, "Daily");
    assert_eq!(entry.category_names, vec!["Backend", "Frontend"]);
    assert_eq!(entry.description, "standup notes");
    assert_eq!(entry.start_date, NaiveDate::from_ymd_opt(2025, 1, 15));
    assert!(entry.end_date.is_none());
    assert!(entry.date_error.is_none());
    assert_eq!(entry.source_line_number, 1);
    assert!(entry.edited_fields.is_empty());
}

#[test]
fn test_parse_calledTwice_shouldYieldIdenticalCandidates() {
    let parser = EntryParser::default();
    let text = format!("{}\nGamma - Ana Lima - Incident - Infra - 01-02-2025 - outage", SAMPLE_LINE);

    let first = parser.parse(&text);
    let second = parser.parse(&text);

    assert_eq!(first, second);
}

#[test]
fn test_parse_withBlankLines_shouldKeepSourceLineNumbers() {
    let parser = EntryParser::default();
    let text = format!("{}\n\n   \nGamma - Ana Lima - Incident - Infra - 01-02-2025 - outage", SAMPLE_LINE);

    let candidates = parser.parse(&text);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].source_line_number, 1);
    assert_eq!(candidates[1].source_line_number, 4);
}

#[test]
fn test_parse_withMalformedLine_shouldSkipItAndKeepSurvivorOrder() {
    let parser = EntryParser::default();
    let text = format!("just some chatter\n{}\nGamma - Ana Lima - Incident - Infra - 01-02-2025 - outage", SAMPLE_LINE);

    let candidates = parser.parse(&text);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].squad_name, "Alpha");
    assert_eq!(candidates[1].squad_name, "Gamma");
    assert_eq!(candidates[0].source_line_number, 2);
    assert_eq!(candidates[1].source_line_number, 3);
}

#[test]
fn test_skippedLines_withMalformedLine_shouldReferenceItsLineNumber() {
    let parser = EntryParser::default();
    let text = format!("{}\nAlpha - too - few", SAMPLE_LINE);

    let skipped = parser.skipped_lines(&text);

    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].starts_with("line 2:"));
}

#[test]
fn test_canParse_withStructuredLine_shouldBeTrue() {
    let parser = EntryParser::default();
    assert!(parser.can_parse(SAMPLE_LINE));
    assert!(parser.can_parse(&format!("noise\n{}", SAMPLE_LINE)));
}

#[test]
fn test_canParse_withFreeChatter_shouldBeFalse() {
    let parser = EntryParser::default();
    assert!(!parser.can_parse("hello, can you log this for me?"));
    assert!(!parser.can_parse(""));
    assert!(!parser.can_parse("   \n  "));
}

#[test]
fn test_parse_withDateRange_shouldFillBothDates() {
    let parser = EntryParser::default();
    let candidates =
        parser.parse("Alpha - Jane Doe - Daily - Backend - 15-01-2025 a 20-01-2025 - sprint work");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].start_date, NaiveDate::from_ymd_opt(2025, 1, 15));
    assert_eq!(candidates[0].end_date, NaiveDate::from_ymd_opt(2025, 1, 20));
    assert!(candidates[0].date_error.is_none());
}

#[test]
fn test_parse_withEnglishConnective_shouldFillBothDates() {
    let parser = EntryParser::default();
    let candidates =
        parser.parse("Alpha - Jane Doe - Daily - Backend - 15-01-2025 to 20-01-2025 - sprint work");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].end_date, NaiveDate::from_ymd_opt(2025, 1, 20));
}

#[test]
fn test_parse_withUnparsableDate_shouldKeepCandidateWithDateError() {
    let parser = EntryParser::default();
    let candidates = parser.parse("Alpha - Jane Doe - Daily - Backend - 31-13-2025 - bad date");

    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].start_date.is_none());
    assert_eq!(candidates[0].date_error.as_deref(), Some("31-13-2025"));
}

#[test]
fn test_parse_withInvertedRange_shouldReportDateError() {
    let parser = EntryParser::default();
    let candidates =
        parser.parse("Alpha - Jane Doe - Daily - Backend - 20-01-2025 a 15-01-2025 - backwards");

    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].start_date.is_none());
    assert_eq!(
        candidates[0].date_error.as_deref(),
        Some("20-01-2025 a 15-01-2025")
    );
}

#[test]
fn test_parse_withEmptyCategoryTokens_shouldDropThem() {
    let parser = EntryParser::default();
    let candidates =
        parser.parse("Alpha - Jane Doe - Daily - Backend, , Frontend, - 15-01-2025 - notes");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].category_names, vec!["Backend", "Frontend"]);
}

#[test]
fn test_parse_withDelimiterInDescription_shouldKeepDescriptionWhole() {
    let parser = EntryParser::default();
    let candidates = parser
        .parse("Alpha - Jane Doe - Daily - Backend - 15-01-2025 - reviewed PRs - paired - deployed");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].description, "reviewed PRs - paired - deployed");
}

#[test]
fn test_parse_withEmptyInput_shouldReturnNothing() {
    let parser = EntryParser::default();
    assert!(parser.parse("").is_empty());
    assert!(parser.skipped_lines("").is_empty());
}

#[test]
fn test_parse_withBlankRequiredField_shouldSkipLine() {
    let parser = EntryParser::default();
    // Category segment holds only separators, so it trims down to nothing
    let candidates = parser.parse("Alpha - Jane Doe - Daily - , - 15-01-2025 - notes");

    assert!(candidates.is_empty());
    assert_eq!(
        parser
            .skipped_lines("Alpha - Jane Doe - Daily - , - 15-01-2025 - notes")
            .len(),
        1
    );
}
