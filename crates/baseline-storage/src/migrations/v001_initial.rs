//! V001: Initial schema — new code period settings.

pub const MIGRATION_SQL: &str = r#"
-- New code period settings, at most one row per scope.
-- Global scope: project_uuid and branch_uuid NULL.
-- Project scope: branch_uuid NULL.
-- Branch scope: both set.
CREATE TABLE IF NOT EXISTS new_code_periods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_uuid TEXT,
    branch_uuid TEXT,
    kind TEXT NOT NULL,
    value TEXT,
    updated_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_new_code_periods_scope
    ON new_code_periods(project_uuid, branch_uuid);
"#;
