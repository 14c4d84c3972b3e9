use bikeshare_stats::analyzers::TripReport;
use bikeshare_stats::config::CityConfig;
use bikeshare_stats::driver::run_session;
use bikeshare_stats::filters::FilterSelection;
use bikeshare_stats::loader::load_data;
use bikeshare_stats::prompt::{GREETING, INVALID_INPUT};

fn fixtures() -> CityConfig {
    CityConfig::new(format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR")))
}

fn session(script: &str) -> String {
    let mut input = script.as_bytes();
    let mut output = Vec::new();
    run_session(&fixtures(), &mut input, &mut output).expect("session failed");
    String::from_utf8(output).unwrap()
}

#[test]
fn test_full_session_january() {
    let text = session("chicago\njanuary\nall\nno\n");

    assert!(text.contains("The most common month is January. Count: 3"));
    assert!(text.contains("The most common day of week is Monday. Count: 2"));
    assert!(text.contains("The most common start hour is 08. Count: 2"));

    assert!(text.contains("The most common start station is Canal St. Count: 2"));
    assert!(text.contains("The most common end station is Clark St. Count: 2"));
    assert!(text.contains("trip is Canal St to Clark St. Count: 2"));

    assert!(text.contains("Total travel time: 0 days 00:35:00"));
    assert!(text.contains("Average travel time: 0 days 00:11:40"));

    assert!(text.contains("Counts of user types:\nSubscriber: 2\nCustomer: 1\n"));
    assert!(text.contains("Counts of gender:\nMale: 1\nFemale: 1\n"));
    assert!(text.contains("Earliest birth year: 1985"));
    assert!(text.contains("Most recent birth year: 1990"));
    assert!(text.contains("Most common birth year is 1985. Count: 1"));

    assert_eq!(text.matches(GREETING).count(), 1);
}

#[test]
fn test_session_without_optional_columns() {
    let text = session("washington\nall\nmonday\nno\n");

    assert!(text.contains("The most common month is June. Count: 2"));
    assert!(text.contains("Counts of user types:\nSubscriber: 2\n"));
    assert!(!text.contains("gender"));
    assert!(!text.contains("birth year"));
}

#[test]
fn test_session_restarts_on_yes() {
    let text = session("Washington\nall\nall\nYES\nCHICAGO\nfebruary\nall\nnope\n");

    assert_eq!(text.matches(GREETING).count(), 2);
    assert!(text.contains("The most common month is June. Count: 3"));
    assert!(text.contains("The most common month is February. Count: 1"));
}

#[test]
fn test_session_reprompts_invalid_input() {
    let text = session("denver\nchicago\nDecember\nmarch\nfri\nfriday\nno\n");

    assert_eq!(text.matches(INVALID_INPUT).count(), 3);
    assert!(text.contains("The most common start station is Clark St. Count: 1"));
}

#[test]
fn test_session_with_no_matching_trips() {
    let text = session("chicago\njune\nall\nno\n");

    assert!(text.contains("No trips match the selected filters."));
    assert!(text.contains("Counts of user types:\n"));
}

#[test]
fn test_session_missing_data_file() {
    let config = CityConfig::new("/no/such/dir");
    let mut input = "new york city\nall\nall\nno\n".as_bytes();
    let mut output = Vec::new();

    let err = run_session(&config, &mut input, &mut output).unwrap_err();
    assert!(format!("{:#}", err).contains("new_york_city.csv"));
}

#[test]
fn test_report_json_pipeline() {
    let selection = FilterSelection::from_args("chicago", "All", "All").unwrap();
    let mut table = load_data(&fixtures(), &selection).expect("Failed to load fixtures");
    let report = TripReport::build(&selection, &mut table);

    assert_eq!(report.trips, 5);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["month"], "All");
    assert_eq!(json["times"]["start_hour"]["value"], "08");
    assert_eq!(json["times"]["start_hour"]["count"], 3);
    assert_eq!(json["durations"]["total"], "0 days 01:15:00");
    assert_eq!(json["users"]["birth_year"]["most_common"]["value"], 1985);
}
