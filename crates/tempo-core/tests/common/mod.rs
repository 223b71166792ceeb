use std::path::PathBuf;

use tempfile::TempDir;

/// Monday 19 October 2026; fixture sessions are dated this day.
pub const DAY: &str = "2026-10-19";

/// Writes a goals file with `count` active goals (g1..gN) that each still
/// need an hour today, plus one archived goal and one goal already done.
pub fn write_goals_file(count: usize) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("goals.json");

    let mut goals = Vec::new();
    let mut sessions = Vec::new();
    for i in 1..=count {
        goals.push(format!(
            r#"{{ "id": "g{i}", "title": "Goal {i}", "weekly_target_secs": 25200, "preferred_times": ["morning"] }}"#
        ));
        sessions.push(format!(
            r#"{{ "goal_id": "g{i}", "date": "{DAY}", "elapsed_secs": 0, "daily_target_secs": 3600 }}"#
        ));
    }
    goals.push(
        r#"{ "id": "old", "title": "Old goal", "weekly_target_secs": 3600, "status": "archived" }"#
            .to_string(),
    );
    sessions.push(format!(
        r#"{{ "goal_id": "old", "date": "{DAY}", "daily_target_secs": 600 }}"#
    ));
    goals.push(
        r#"{ "id": "done", "title": "Done goal", "weekly_target_secs": 7000 }"#.to_string(),
    );
    sessions.push(format!(
        r#"{{ "goal_id": "done", "date": "{DAY}", "elapsed_secs": 1000, "daily_target_secs": 1000 }}"#
    ));
    // yesterday's session must be ignored
    sessions.push(
        r#"{ "goal_id": "g1", "date": "2026-10-18", "elapsed_secs": 3600, "daily_target_secs": 3600 }"#
            .to_string(),
    );

    let json = format!(
        "{{\n  \"goals\": [{}],\n  \"sessions\": [{}]\n}}\n",
        goals.join(",\n"),
        sessions.join(",\n")
    );
    std::fs::write(&path, json).expect("Failed to write goals file");
    (temp_dir, path)
}
