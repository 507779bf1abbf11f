//! Integration tests for the tabulate pipeline.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde_json::json;
use tabprint::{
    strip_ansi, tabulate, tabulate_at, CellTransforms, ColorMode, NamedChildren, Resource,
    SortBy, SourceError, TabulateError, TabulateOptions, TerminalInfo, Value, ACCESS_DENIED,
};

#[derive(Debug)]
struct Instance {
    id: &'static str,
    name: &'static str,
    launched: DateTime<Utc>,
    tags: serde_json::Value,
}

impl Resource for Instance {
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
        match name {
            "InstanceId" => Some(Ok(Value::from(self.id))),
            "Name" => Some(Ok(Value::from(self.name))),
            "LaunchTime" => Some(Ok(Value::from(self.launched))),
            "Tags" => Some(Ok(Value::from(&self.tags))),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Members(Result<Vec<String>, SourceError>);

impl NamedChildren for Members {
    fn child_names(&self) -> Result<Vec<String>, SourceError> {
        self.0.clone()
    }
}

#[derive(Debug)]
struct Group {
    name: &'static str,
    members: Result<Vec<String>, SourceError>,
}

impl Resource for Group {
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
        match name {
            "GroupName" => Some(Ok(Value::from(self.name))),
            "users" => Some(Ok(Value::children(Members(self.members.clone())))),
            _ => None,
        }
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

fn fleet() -> Vec<Instance> {
    vec![
        Instance {
            id: "i-0b",
            name: "web",
            launched: now() - TimeDelta::days(3),
            tags: json!([{"Key": "env", "Value": "prod"}]),
        },
        Instance {
            id: "i-0a",
            name: "db",
            launched: now() - TimeDelta::hours(5),
            tags: json!([]),
        },
        Instance {
            id: "i-0c",
            name: "cache",
            launched: now() - TimeDelta::days(40),
            tags: json!(null),
        },
    ]
}

fn plain(columns: &[&str]) -> TabulateOptions {
    TabulateOptions::new(columns.iter().copied())
        .color(ColorMode::Never)
        .terminal(TerminalInfo::piped())
}

/// Data rows of a rendered table, with borders and padding removed.
fn data_rows(table: &str) -> Vec<Vec<String>> {
    table
        .lines()
        .skip(3)
        .filter(|line| line.starts_with('│'))
        .map(|line| {
            line.trim_matches('│')
                .split('│')
                .map(|cell| cell.trim_end().to_string())
                .collect()
        })
        .collect()
}

fn column(table: &str, index: usize) -> Vec<String> {
    data_rows(table).into_iter().map(|row| row[index].clone()).collect()
}

#[test]
fn test_table_layout() {
    let table = tabulate_at(
        &fleet(),
        &plain(&["InstanceId", "Name"]),
        &CellTransforms::new(),
        now(),
    )
    .unwrap();

    let expected = "\
┌──────────┬─────┐
│InstanceId│Name │
├──────────┼─────┤
│i-0b      │web  │
│i-0a      │db   │
│i-0c      │cache│
└──────────┴─────┘";
    assert_eq!(table, expected);
}

#[test]
fn test_sort_by_name() {
    let options = plain(&["Name"]).sort_by(SortBy::field("Name"));
    let table = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap();
    assert_eq!(column(&table, 0), vec!["cache", "db", "web"]);
}

#[test]
fn test_sort_by_name_reverse() {
    let options = plain(&["Name"]).sort_by("Name:reverse".parse().unwrap());
    let table = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap();
    assert_eq!(column(&table, 0), vec!["web", "db", "cache"]);
}

#[test]
fn test_sort_by_timestamp_is_chronological() {
    let options = plain(&["Name", "LaunchTime"]).sort_by(SortBy::field("LaunchTime"));
    let table = tabulate_at(&fleet(), &options, &CellTransforms::new(), now()).unwrap();

    assert_eq!(column(&table, 0), vec!["cache", "web", "db"]);
    assert_eq!(
        column(&table, 1),
        vec!["1 month ago", "3 days ago", "5 hours ago"]
    );
}

#[test]
fn test_unknown_sort_field() {
    let options = plain(&["Name"]).sort_by(SortBy::field("Region"));
    let err = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap_err();
    assert!(matches!(err, TabulateError::UnknownSortField(ref f) if f == "Region"));
}

#[test]
fn test_tags_column_formatted_by_default() {
    let table = tabulate(&fleet(), &plain(&["Name", "Tags"]), &CellTransforms::new()).unwrap();
    assert_eq!(column(&table, 1), vec!["env=prod", "", ""]);
}

#[test]
fn test_json_mode() {
    let fleet = fleet();
    let options = plain(&["Name", "Tags"]).json(true);
    let out = tabulate(&fleet[..2], &options, &CellTransforms::new()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"Name": "web", "Tags": "env=prod"},
            {"Name": "db", "Tags": ""}
        ])
    );
    // Pretty-printed with two-space indentation, keys in column order.
    assert!(out.starts_with("[\n  {\n    \"Name\": \"web\",\n    \"Tags\""));
}

#[test]
fn test_json_mode_keeps_raw_values() {
    let options = plain(&["InstanceId", "LaunchTime"]).json(true);
    let out = tabulate(&fleet()[..1], &options, &CellTransforms::new()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["LaunchTime"], json!("2024-03-12T09:30:00Z"));
}

#[test]
fn test_json_mode_ignores_sort() {
    let options = plain(&["Name"]).json(true).sort_by(SortBy::field("Name"));
    let out = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["Name"], json!("web"));
}

#[test]
fn test_custom_transform() {
    let transforms = CellTransforms::new().with("Name", |value: Value, row: &dyn Resource| {
        let id = tabprint::resolve_field(row, "InstanceId").unwrap_or_default();
        Value::from(format!("{} ({})", value, id))
    });
    let table = tabulate(&fleet()[..1], &plain(&["Name"]), &transforms).unwrap();
    assert_eq!(column(&table, 0), vec!["web (i-0b)"]);
}

#[test]
fn test_children_and_access_denied() {
    let groups = vec![
        Group {
            name: "admins",
            members: Ok(vec!["alice".into(), "bob".into()]),
        },
        Group {
            name: "auditors",
            members: Err(SourceError::access_denied("iam:GetGroup")),
        },
    ];
    let table = tabulate(&groups, &plain(&["GroupName", "users"]), &CellTransforms::new()).unwrap();
    assert_eq!(column(&table, 1), vec!["alice, bob", ACCESS_DENIED]);
}

#[test]
fn test_source_errors_abort() {
    let groups = vec![Group {
        name: "ops",
        members: Err(SourceError::with_code("ServiceUnavailable", "try later")),
    }];
    let err = tabulate(&groups, &plain(&["users"]), &CellTransforms::new()).unwrap_err();
    assert!(matches!(err, TabulateError::Source(_)));
    assert!(!err.is_usage());
}

#[test]
fn test_unresolvable_field() {
    let err = tabulate(&fleet(), &plain(&["Placement.Zone"]), &CellTransforms::new()).unwrap_err();
    match err {
        TabulateError::FieldResolution { field, segment, .. } => {
            assert_eq!(field, "Placement.Zone");
            assert_eq!(segment, "Placement");
        }
        other => panic!("Expected FieldResolution, got {:?}", other),
    }
}

#[test]
fn test_json_items_mixed_shapes() {
    let items = vec![
        json!({"Name": "a", "State": {"Name": "running"}}),
        json!({"Name": "b", "State": {}}),
    ];
    let options = plain(&["Name", "State.Name"]).trim_col_names(["State."]);
    let table = tabulate(&items, &options, &CellTransforms::new()).unwrap();

    assert!(table.contains("│Name│Name   │"));
    assert_eq!(column(&table, 1), vec!["running", ""]);
}

#[test]
fn test_display_names_override_trimming() {
    let options = plain(&["InstanceId", "Name"])
        .trim_col_names(["Instance"])
        .display_column_names(["Instance ID", "Name"]);
    let table = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap();
    assert!(table.contains("│Instance ID│Name │"));
}

#[test]
fn test_display_names_arity_mismatch() {
    let options = plain(&["InstanceId", "Name"]).display_column_names(["Id"]);
    let err = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap_err();
    assert!(matches!(err, TabulateError::Render(_)));
}

#[test]
fn test_max_col_width_truncates() {
    let items = vec![json!({
        "Id": "vol-0123456789",
        "Description": "scratch volume for nightly jobs"
    })];
    let options = plain(&["Id", "Description"]).max_col_width(10);
    let table = tabulate(&items, &options, &CellTransforms::new()).unwrap();
    assert_eq!(data_rows(&table), vec![vec!["vol-0123456789", "scratch v…"]]);
}

#[test]
fn test_auto_fit_requires_terminal() {
    let options = plain(&["Name"]).max_col_width(0);
    let err = tabulate(&fleet(), &options, &CellTransforms::new()).unwrap_err();
    assert!(matches!(err, TabulateError::Render(_)));
    assert!(err.is_usage());
}

#[test]
fn test_auto_fit_shrinks_to_terminal() {
    let long = "x".repeat(60);
    let items = vec![json!({"Id": "1", "A": long, "B": long})];
    let options = plain(&["Id", "A", "B"])
        .max_col_width(0)
        .terminal(TerminalInfo::interactive(40, 24));
    let table = tabulate(&items, &options, &CellTransforms::new()).unwrap();

    let width = table.lines().next().map(|l| l.chars().count()).unwrap();
    assert!(width <= 80, "table is {} wide", width);
    assert!(data_rows(&table)[0][1].ends_with('…'));
}

#[test]
fn test_colored_output_strips_to_plain() {
    let colored = TabulateOptions::new(["Name"])
        .color(ColorMode::Always)
        .terminal(TerminalInfo::piped());
    let with_color = tabulate(&fleet(), &colored, &CellTransforms::new()).unwrap();
    let without = tabulate(&fleet(), &plain(&["Name"]), &CellTransforms::new()).unwrap();

    assert_ne!(with_color, without);
    assert_eq!(strip_ansi(&with_color), without);
}

#[test]
fn test_empty_collection() {
    let none: Vec<Instance> = Vec::new();
    let table = tabulate(&none, &plain(&["A", "B"]), &CellTransforms::new()).unwrap();
    assert_eq!(table, "┌─┬─┐\n│A│B│\n├─┼─┤\n└─┴─┘");
}

#[test]
fn test_nested_maps_keep_key_order() {
    let items = vec![json!({"State": {"Name": "running", "Code": 16}})];

    let table = tabulate(&items, &plain(&["State"]), &CellTransforms::new()).unwrap();
    assert_eq!(column(&table, 0), vec![r#"{"Name":"running","Code":16}"#]);

    let out = tabulate(&items, &plain(&["State"]).json(true), &CellTransforms::new()).unwrap();
    let name = out.find("\"Name\"").unwrap();
    let code = out.find("\"Code\"").unwrap();
    assert!(name < code, "keys reordered in {}", out);
}
