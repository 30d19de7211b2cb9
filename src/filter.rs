//! Task Filter
//!
//! Visibility predicate for the task list: project scope first, then the
//! active date window. Input order is preserved (the server returns tasks
//! newest-first).

use chrono::NaiveDate;
use uuid::Uuid;

use crate::dates;
use crate::models::{FilterMode, Task};

/// Select the tasks visible under the current sidebar selection.
pub fn visible_tasks(
    tasks: &[Task],
    filter: Option<FilterMode>,
    active_project: Option<Uuid>,
    today: NaiveDate,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| is_visible(task, filter, active_project, today))
        .cloned()
        .collect()
}

fn is_visible(
    task: &Task,
    filter: Option<FilterMode>,
    active_project: Option<Uuid>,
    today: NaiveDate,
) -> bool {
    if let Some(project_id) = active_project {
        if task.project_id != Some(project_id) {
            return false;
        }
    }
    match filter {
        Some(FilterMode::Today) => {
            task.due_date == Some(today) || (task.due_date.is_none() && !task.completed)
        }
        Some(FilterMode::Upcoming) => task
            .due_date
            .is_some_and(|due| due >= today && due <= dates::upcoming_end(today)),
        Some(FilterMode::All) | None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u128, due: Option<NaiveDate>, completed: bool) -> Task {
        Task {
            id: Uuid::from_u128(id),
            user_id: Uuid::from_u128(0xA0),
            project_id: None,
            title: format!("task {}", id),
            completed,
            due_date: due,
            priority: Priority::Low,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn ids(tasks: &[Task]) -> Vec<Uuid> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn today_mode_keeps_due_today_and_undated_open() {
        let today = date(2024, 6, 10);
        let tasks = vec![
            task(1, Some(today), false),
            task(2, None, false),
            task(3, None, true),
            task(4, Some(date(2024, 6, 9)), false),
        ];
        let visible = visible_tasks(&tasks, Some(FilterMode::Today), None, today);
        assert_eq!(ids(&visible), vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
    }

    #[test]
    fn upcoming_mode_window_is_inclusive_at_seven_days() {
        let today = date(2024, 6, 10);
        let tasks = vec![
            task(1, Some(date(2024, 6, 10)), false),
            task(2, Some(date(2024, 6, 16)), false),
            task(3, Some(date(2024, 6, 17)), false),
            task(4, None, false),
            task(5, Some(date(2024, 6, 18)), false),
        ];
        let visible = visible_tasks(&tasks, Some(FilterMode::Upcoming), None, today);
        assert_eq!(
            ids(&visible),
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
    }

    #[test]
    fn all_mode_passes_everything() {
        let today = date(2024, 6, 10);
        let tasks = vec![
            task(1, Some(date(2020, 1, 1)), true),
            task(2, None, false),
        ];
        let visible = visible_tasks(&tasks, Some(FilterMode::All), None, today);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn project_scope_applies_before_date_logic() {
        let today = date(2024, 6, 10);
        let project = Uuid::from_u128(0xBEEF);
        let mut in_project = task(1, Some(today), false);
        in_project.project_id = Some(project);
        let tasks = vec![in_project, task(2, Some(today), false)];

        let visible = visible_tasks(&tasks, Some(FilterMode::Today), Some(project), today);
        assert_eq!(ids(&visible), vec![Uuid::from_u128(1)]);
    }

    #[test]
    fn no_filter_with_no_project_passes_everything() {
        let today = date(2024, 6, 10);
        let tasks = vec![task(1, None, true), task(2, Some(today), false)];
        let visible = visible_tasks(&tasks, None, None, today);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let today = date(2024, 6, 10);
        let tasks = vec![
            task(1, Some(today), false),
            task(2, None, false),
            task(3, Some(date(2024, 6, 20)), false),
        ];
        for mode in [FilterMode::Today, FilterMode::Upcoming, FilterMode::All] {
            let once = visible_tasks(&tasks, Some(mode), None, today);
            let twice = visible_tasks(&once, Some(mode), None, today);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn preserves_input_order() {
        let today = date(2024, 6, 10);
        let tasks = vec![
            task(3, Some(today), false),
            task(1, Some(today), false),
            task(2, Some(today), false),
        ];
        let visible = visible_tasks(&tasks, Some(FilterMode::Today), None, today);
        assert_eq!(
            ids(&visible),
            vec![Uuid::from_u128(3), Uuid::from_u128(1), Uuid::from_u128(2)]
        );
    }
}
