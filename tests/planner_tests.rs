mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use taskboard_mcp::model::{TaskPatch, local_date_today};
use taskboard_mcp::notifications::{ReminderKind, cancel_ids, notification_id};
use taskboard_mcp::{CascadeReport, Planner, PlannerConfig, TaskboardError};

#[test]
fn test_task_order_is_max_plus_one_per_project() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let a = create_project(&planner, &category.id, "A");
    let b = create_project(&planner, &category.id, "B");

    let first = create_task(&planner, &a.id, "a0", due_in_days(1));
    let second = create_task(&planner, &a.id, "a1", due_in_days(1));
    let other = create_task(&planner, &b.id, "b0", due_in_days(1));

    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);
    assert_eq!(other.order, 0);
}

#[test]
fn test_concurrent_task_creation_keeps_every_task() {
    let (planner, _temp_file) = get_test_planner();
    let planner = Arc::new(planner);
    let category = create_category(&planner, "Work");
    let project = create_project(&planner, &category.id, "Launch");

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let planner = Arc::clone(&planner);
            let project_id = project.id.clone();
            thread::spawn(move || {
                for n in 0..25 {
                    create_task(
                        &planner,
                        &project_id,
                        &format!("w{}-{}", worker, n),
                        due_in_days(1),
                    );
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let tasks = planner.project_tasks(&project.id).unwrap();
    assert_eq!(tasks.len(), 100);
    let orders: BTreeSet<i64> = tasks.iter().map(|t| t.order).collect();
    assert_eq!(orders, (0..100).collect::<BTreeSet<i64>>());
}

#[test]
fn test_move_task_appends_to_target() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let a = create_project(&planner, &category.id, "A");
    let b = create_project(&planner, &category.id, "B");

    create_task(&planner, &b.id, "b0", due_in_days(1));
    create_task(&planner, &b.id, "b1", due_in_days(1));
    let moving = create_task(&planner, &a.id, "a0", due_in_days(1));

    let moved = planner.move_task(&moving.id, &b.id).unwrap();
    assert_eq!(moved.project_id, b.id);
    assert_eq!(moved.order, 2);

    let titles: Vec<String> = planner
        .project_tasks(&b.id)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["b0", "b1", "a0"]);
    assert!(planner.project_tasks(&a.id).unwrap().is_empty());
}

#[test]
fn test_reorder_rewrites_order_and_skips_foreign_ids() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let a = create_project(&planner, &category.id, "A");
    let b = create_project(&planner, &category.id, "B");

    let t0 = create_task(&planner, &a.id, "t0", due_in_days(1));
    let t1 = create_task(&planner, &a.id, "t1", due_in_days(1));
    let t2 = create_task(&planner, &a.id, "t2", due_in_days(1));
    let foreign = create_task(&planner, &b.id, "foreign", due_in_days(1));

    let ids = vec![t2.id.clone(), foreign.id.clone(), t0.id.clone(), t1.id.clone()];
    let updated = planner.reorder_tasks(&a.id, &ids).unwrap();
    assert_eq!(updated, 3);

    let ordered: Vec<(String, i64)> = planner
        .project_tasks(&a.id)
        .unwrap()
        .into_iter()
        .map(|t| (t.title, t.order))
        .collect();
    assert_eq!(
        ordered,
        vec![
            ("t2".to_string(), 0),
            ("t0".to_string(), 2),
            ("t1".to_string(), 3),
        ]
    );
    assert_eq!(planner.task(&foreign.id).unwrap().order, 0);
}

#[test]
fn test_delete_category_cascades_and_persists() {
    let (planner, temp_file) = get_test_planner();
    let work = create_category(&planner, "Work");
    let home = create_category(&planner, "Home");
    let launch = create_project(&planner, &work.id, "Launch");
    let chores = create_project(&planner, &home.id, "Chores");
    create_task(&planner, &launch.id, "ship", due_in_days(2));
    create_task(&planner, &launch.id, "announce", due_in_days(3));
    let kept = create_task(&planner, &chores.id, "dishes", due_in_days(1));

    let report = planner.delete_category(&work.id).unwrap();
    assert_eq!(report, CascadeReport { projects: 1, tasks: 2 });

    let reopened = Planner::open(PlannerConfig::with_data_file(temp_file.path())).unwrap();
    assert_eq!(reopened.categories().unwrap(), vec![home]);
    assert_eq!(reopened.projects(None).unwrap(), vec![chores]);
    assert_eq!(reopened.tasks().unwrap(), vec![kept.clone()]);

    let reminder_tasks: Vec<String> = reopened
        .reminders()
        .unwrap()
        .into_iter()
        .map(|r| r.task_id)
        .collect();
    assert!(reminder_tasks.iter().all(|id| id == &kept.id));
}

#[test]
fn test_unknown_references_are_not_found() {
    let (planner, _temp_file) = get_test_planner();

    assert!(matches!(
        planner.delete_category("cat_missing"),
        Err(TaskboardError::NotFound { entity: "Category", .. })
    ));
    assert!(matches!(
        planner.delete_project("proj_missing"),
        Err(TaskboardError::NotFound { entity: "Project", .. })
    ));
    assert!(matches!(
        planner.delete_task("task_missing"),
        Err(TaskboardError::NotFound { entity: "Task", .. })
    ));
    assert!(matches!(
        planner.toggle_task("task_missing"),
        Err(TaskboardError::NotFound { entity: "Task", .. })
    ));
}

#[test]
fn test_reminders_follow_task_lifecycle() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let project = create_project(&planner, &category.id, "Launch");

    let task = create_task(&planner, &project.id, "ship", due_in_days(3));
    let mut ids: Vec<i32> = planner.reminders().unwrap().iter().map(|r| r.id).collect();
    ids.sort();
    let mut expected: Vec<i32> = [1, 6, 24]
        .iter()
        .map(|h| notification_id(&task.id, *h))
        .collect();
    expected.sort();
    assert_eq!(ids, expected);

    // Moving the due date into the past leaves only the overdue reminder
    planner
        .update_task(
            &task.id,
            TaskPatch {
                due_date: Some(due_in_days(-2)),
                ..Default::default()
            },
        )
        .unwrap();
    let reminders = planner.reminders().unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].kind, ReminderKind::Overdue);
    assert!(cancel_ids(&task.id).contains(&reminders[0].id));

    planner.delete_task(&task.id).unwrap();
    assert!(planner.reminders().unwrap().is_empty());
}

#[test]
fn test_disabling_notifications_cancels_and_enabling_replans() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let project = create_project(&planner, &category.id, "Launch");
    create_task(&planner, &project.id, "ship", due_in_days(3));

    assert_eq!(planner.set_notifications(false).unwrap(), 0);
    assert!(!planner.notifications_enabled().unwrap());

    // Changes while disabled schedule nothing
    create_task(&planner, &project.id, "announce", due_in_days(4));
    assert!(planner.reminders().unwrap().is_empty());

    assert_eq!(planner.set_notifications(true).unwrap(), 6);
}

#[test]
fn test_dashboard_counts_and_upcoming_cap() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let project = create_project(&planner, &category.id, "Launch");

    for day in 0..7 {
        create_task(&planner, &project.id, &format!("t{}", day), due_in_days(day));
    }
    let late = create_task(&planner, &project.id, "late", due_in_days(-3));
    let done = create_task(&planner, &project.id, "done", due_in_days(1));
    planner.toggle_task(&done.id).unwrap();

    let summary = planner.dashboard(local_date_today()).unwrap();
    assert_eq!(summary.total, 9);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.progress_percent, 11);
    assert_eq!(summary.overdue, vec![planner.task(&late.id).unwrap()]);
    assert_eq!(summary.upcoming.len(), 5);
    assert_eq!(summary.upcoming[0].title, "t0");
    assert!(summary.upcoming.iter().all(|t| !t.completed));
}

#[test]
fn test_due_today_and_dates_with_tasks() {
    let (planner, _temp_file) = get_test_planner();
    let category = create_category(&planner, "Work");
    let project = create_project(&planner, &category.id, "Launch");

    let today_task = create_task(&planner, &project.id, "today", due_in_days(0));
    let later = create_task(&planner, &project.id, "later", due_in_days(3));
    create_task(&planner, &project.id, "also later", due_in_days(3));

    let due: Vec<String> = planner
        .due_today(local_date_today())
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(due, vec![today_task.id.clone()]);

    let dates = planner.dates_with_tasks().unwrap();
    assert_eq!(
        dates,
        vec![today_task.due_date.date(), later.due_date.date()]
    );
}
