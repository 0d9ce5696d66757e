//! Retroplanning - backward scheduling of project phases from a fixed deadline.
//!
//! [`compute_dates_from_deadline`] is a pure function: the last task ends on the
//! deadline, every earlier task ends the day before its successor starts, and
//! each range is inclusive on both ends. The store-backed helpers below persist
//! a computed plan per project and validate durations before scheduling.

use crate::{
    core::dates::{format_day, shift_days},
    entities::{RetroplanningTask as RetroplanningTaskEntity, retroplanning_task},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Color tag attached to a task, used by renderers to pick a bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    /// Blue
    Blue,
    /// Green
    Green,
    /// Amber
    Amber,
    /// Purple
    Purple,
    /// Pink
    Pink,
    /// Gray
    Gray,
}

impl TaskColor {
    /// Every color, in palette order.
    pub const ALL: [Self; 6] = [
        Self::Blue,
        Self::Green,
        Self::Amber,
        Self::Purple,
        Self::Pink,
        Self::Gray,
    ];

    /// Stored tag for this color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for TaskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config {
                message: format!("Unknown task color '{s}'"),
            })
    }
}

/// A task before scheduling: what it is and how long it takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStub {
    /// Caller-chosen identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Inclusive length in days; expected to be at least 1
    pub duration_days: i64,
    /// Color tag
    pub color: TaskColor,
}

impl TaskStub {
    /// Builds a stub.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        duration_days: i64,
        color: TaskColor,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            duration_days,
            color,
        }
    }
}

/// A scheduled task with its computed `YYYY-MM-DD` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetroplanningTask {
    /// Caller-chosen identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Inclusive length in days
    pub duration_days: i64,
    /// Color tag
    pub color: TaskColor,
    /// First day of the task
    pub start_date: String,
    /// Last day of the task
    pub end_date: String,
}

/// Schedules `tasks` backward so the last one ends on `deadline`.
///
/// The output has the same order and length as the input. Durations are not
/// validated here: a zero or negative duration yields an inverted range and
/// the chain continues from it.
#[must_use]
pub fn compute_dates_from_deadline(
    tasks: &[TaskStub],
    deadline: NaiveDate,
) -> Vec<RetroplanningTask> {
    let mut scheduled = Vec::with_capacity(tasks.len());
    let mut end = deadline;

    for stub in tasks.iter().rev() {
        let start = shift_days(end, 1_i64.saturating_sub(stub.duration_days));
        scheduled.push(RetroplanningTask {
            id: stub.id.clone(),
            label: stub.label.clone(),
            duration_days: stub.duration_days,
            color: stub.color,
            start_date: format_day(start),
            end_date: format_day(end),
        });
        end = shift_days(start, -1);
    }

    scheduled.reverse();
    scheduled
}

/// Rejects any stub shorter than one day.
///
/// # Errors
/// Returns [`Error::InvalidDuration`] for the first offending stub.
pub fn validate_stubs(tasks: &[TaskStub]) -> Result<()> {
    match tasks.iter().find(|stub| stub.duration_days < 1) {
        Some(stub) => Err(Error::InvalidDuration {
            days: stub.duration_days,
        }),
        None => Ok(()),
    }
}

/// Parses a compact task list such as `Brief:2, Maquettes:5:purple, Livraison:1`.
///
/// Each entry is `label:days` or `label:days:color`. Entries without a color
/// take the next palette color. Durations are validated.
///
/// # Errors
/// Returns an error for a malformed entry, an unknown color, or a duration
/// below 1.
pub fn parse_stub_list(input: &str) -> Result<Vec<TaskStub>> {
    let stubs = input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(i, entry)| -> Result<TaskStub> {
            let mut parts = entry.split(':').map(str::trim);
            let (Some(label), Some(days)) = (parts.next(), parts.next()) else {
                return Err(Error::Config {
                    message: format!("Expected 'label:days', got '{entry}'"),
                });
            };
            let duration_days = days.parse::<i64>().map_err(|e| Error::Config {
                message: format!("Invalid day count '{days}' in '{entry}': {e}"),
            })?;
            let color = match parts.next() {
                Some(tag) => tag.parse()?,
                None => TaskColor::ALL[i % TaskColor::ALL.len()],
            };
            if parts.next().is_some() {
                return Err(Error::Config {
                    message: format!("Expected 'label:days[:color]', got '{entry}'"),
                });
            }
            Ok(TaskStub::new(format!("task-{i}"), label, duration_days, color))
        })
        .collect::<Result<Vec<_>>>()?;

    validate_stubs(&stubs)?;
    Ok(stubs)
}

/// Computes a plan for a project and replaces whatever plan was stored before.
///
/// Durations are validated first; the delete and inserts run in one
/// database transaction.
///
/// # Errors
/// Returns an error if a duration is below 1, the project does not exist,
/// or the store fails.
#[instrument(skip(db, tasks), fields(task_count = tasks.len()))]
pub async fn save_retroplan(
    db: &DatabaseConnection,
    project_id: i64,
    tasks: &[TaskStub],
    deadline: NaiveDate,
) -> Result<Vec<RetroplanningTask>> {
    validate_stubs(tasks)?;
    crate::core::project::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| Error::ProjectNotFound {
            name: project_id.to_string(),
        })?;

    let plan = compute_dates_from_deadline(tasks, deadline);

    let txn = db.begin().await?;

    let removed = RetroplanningTaskEntity::delete_many()
        .filter(retroplanning_task::Column::ProjectId.eq(project_id))
        .exec(&txn)
        .await?;
    debug!("Removed {} previous retroplanning tasks", removed.rows_affected);

    for (position, task) in plan.iter().enumerate() {
        let row = retroplanning_task::ActiveModel {
            project_id: Set(project_id),
            position: Set(i32::try_from(position).map_err(|e| Error::Config {
                message: format!("Retroplan too long: {e}"),
            })?),
            task_key: Set(task.id.clone()),
            label: Set(task.label.clone()),
            duration_days: Set(task.duration_days),
            color: Set(task.color.as_str().to_string()),
            start_date: Set(task.start_date.clone()),
            end_date: Set(task.end_date.clone()),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;

    info!(
        "Saved retroplan for project {} ending {}",
        project_id,
        format_day(deadline)
    );
    Ok(plan)
}

/// Loads a project's stored plan in task order. Empty if none was saved.
///
/// # Errors
/// Returns an error if the store fails or a stored color tag is unknown.
pub async fn get_retroplan(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<RetroplanningTask>> {
    let rows = RetroplanningTaskEntity::find()
        .filter(retroplanning_task::Column::ProjectId.eq(project_id))
        .order_by_asc(retroplanning_task::Column::Position)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|row| -> Result<RetroplanningTask> {
            Ok(RetroplanningTask {
                color: row.color.parse()?,
                id: row.task_key,
                label: row.label,
                duration_days: row.duration_days,
                start_date: row.start_date,
                end_date: row.end_date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::dates::{days_between_str, parse_day};
    use crate::test_utils::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stubs(durations: &[i64]) -> Vec<TaskStub> {
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                TaskStub::new(format!("t{i}"), format!("Phase {i}"), d, TaskColor::Blue)
            })
            .collect()
    }

    #[test]
    fn test_two_tasks_before_deadline() {
        let plan = compute_dates_from_deadline(&stubs(&[3, 5]), day(2025, 3, 10));

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].id, "t0");
        assert_eq!(plan[0].start_date, "2025-03-03");
        assert_eq!(plan[0].end_date, "2025-03-05");
        assert_eq!(plan[1].id, "t1");
        assert_eq!(plan[1].start_date, "2025-03-06");
        assert_eq!(plan[1].end_date, "2025-03-10");
    }

    #[test]
    fn test_empty_input_gives_empty_plan() {
        assert!(compute_dates_from_deadline(&[], day(2025, 3, 10)).is_empty());
    }

    #[test]
    fn test_plans_are_anchored_gap_free_and_sized() {
        let cases: [(&[i64], NaiveDate); 5] = [
            (&[1], day(2025, 1, 1)),
            (&[2, 2, 2], day(2024, 3, 1)),
            (&[10, 1, 7, 3], day(2025, 12, 31)),
            (&[30, 45], day(2026, 2, 28)),
            (&[1, 1, 1, 1, 1, 1], day(2025, 6, 2)),
        ];

        for (durations, deadline) in cases {
            let plan = compute_dates_from_deadline(&stubs(durations), deadline);
            assert_eq!(plan.len(), durations.len());
            assert_eq!(plan.last().unwrap().end_date, format_day(deadline));

            for (task, &duration) in plan.iter().zip(durations) {
                assert_eq!(
                    days_between_str(&task.start_date, &task.end_date).unwrap(),
                    duration
                );
            }

            for pair in plan.windows(2) {
                let end = parse_day(&pair[0].end_date).unwrap();
                let next_start = parse_day(&pair[1].start_date).unwrap();
                assert_eq!(shift_days(end, 1), next_start);
            }
        }
    }

    #[test]
    fn test_zero_duration_is_not_rejected() {
        let plan = compute_dates_from_deadline(&stubs(&[2, 0]), day(2025, 3, 10));
        // Zero-length last task starts the day after it ends
        assert_eq!(plan[1].start_date, "2025-03-11");
        assert_eq!(plan[1].end_date, "2025-03-10");
        assert_eq!(plan[0].start_date, "2025-03-09");
        assert_eq!(plan[0].end_date, "2025-03-10");
    }

    #[test]
    fn test_validate_stubs() {
        assert!(validate_stubs(&stubs(&[1, 4])).is_ok());
        assert!(matches!(
            validate_stubs(&stubs(&[3, 0, -2])),
            Err(Error::InvalidDuration { days: 0 })
        ));
    }

    #[test]
    fn test_task_color_parsing() {
        assert_eq!("amber".parse::<TaskColor>().unwrap(), TaskColor::Amber);
        assert_eq!(" Purple ".parse::<TaskColor>().unwrap(), TaskColor::Purple);
        assert!("teal".parse::<TaskColor>().is_err());
    }

    #[test]
    fn test_parse_stub_list() {
        let parsed = parse_stub_list("Brief:2, Maquettes:5:purple ,Livraison:1").unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], TaskStub::new("task-0", "Brief", 2, TaskColor::Blue));
        assert_eq!(parsed[1].color, TaskColor::Purple);
        assert_eq!(parsed[2].color, TaskColor::Amber);
        assert_eq!(parsed[2].duration_days, 1);

        assert!(parse_stub_list("").unwrap().is_empty());
        assert!(matches!(parse_stub_list("Brief"), Err(Error::Config { .. })));
        assert!(matches!(parse_stub_list("Brief:x"), Err(Error::Config { .. })));
        assert!(matches!(
            parse_stub_list("Brief:2:blue:oops"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            parse_stub_list("Brief:0"),
            Err(Error::InvalidDuration { days: 0 })
        ));
    }

    #[tokio::test]
    async fn test_save_and_reload_retroplan() -> Result<()> {
        let (db, project) = setup_with_project().await?;

        let saved = save_retroplan(&db, project.id, &stubs(&[3, 5]), day(2025, 3, 10)).await?;
        let loaded = get_retroplan(&db, project.id).await?;
        assert_eq!(saved, loaded);

        // Saving again replaces the previous plan
        let replaced = save_retroplan(&db, project.id, &stubs(&[2]), day(2025, 4, 1)).await?;
        let loaded = get_retroplan(&db, project.id).await?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded, replaced);
        assert_eq!(loaded[0].start_date, "2025-03-31");

        Ok(())
    }

    #[tokio::test]
    async fn test_save_retroplan_rejects_bad_input() -> Result<()> {
        let (db, project) = setup_with_project().await?;

        let result = save_retroplan(&db, project.id, &stubs(&[0]), day(2025, 3, 10)).await;
        assert!(matches!(result, Err(Error::InvalidDuration { days: 0 })));
        assert!(get_retroplan(&db, project.id).await?.is_empty());

        let result = save_retroplan(&db, 999, &stubs(&[2]), day(2025, 3, 10)).await;
        assert!(matches!(result, Err(Error::ProjectNotFound { .. })));

        Ok(())
    }
}
