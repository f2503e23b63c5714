use tempfile::NamedTempFile;
use waypoint_core::{
    ordering::{is_contiguous, prerequisites_satisfied},
    Database, NewTask, PlanFilter, PlanStatus, PlannerError,
    ResourceType, Task, TaskIntelligence, TaskOrder, TaskPatch, TaskStatus,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn create_plan(db: &mut Database, titles: &[&str]) -> u64 {
    let plan = db
        .create_plan("local", "Test Plan", None, PlanStatus::Active)
        .expect("Failed to create plan");
    for title in titles {
        db.add_task(plan.id, &NewTask::titled(*title))
            .expect("Failed to add task");
    }
    plan.id
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

fn with_prerequisites(prerequisites: Vec<u32>) -> TaskIntelligence {
    TaskIntelligence {
        prerequisites,
        ..Default::default()
    }
}

#[test]
fn test_create_and_get_plan() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", "Wedding", Some("June"), PlanStatus::Draft)
        .expect("Failed to create plan");
    assert!(plan.id > 0);

    let fetched = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(fetched.user_id, "alice");
    assert_eq!(fetched.title, "Wedding");
    assert_eq!(fetched.description.as_deref(), Some("June"));
    assert_eq!(fetched.status, PlanStatus::Draft);
    assert!(fetched.tasks.is_empty());

    assert!(db.get_plan(9999).unwrap().is_none());
}

#[test]
fn test_tasks_append_with_contiguous_orders() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B", "C"]);

    let tasks = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&tasks), ["A", "B", "C"]);
    assert!(is_contiguous(&tasks));
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
}

#[test]
fn test_insert_at_position_shifts_and_remaps() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B"]);
    let b = db.get_tasks(plan_id).unwrap()[1].id;
    db.set_task_intelligence(b, &with_prerequisites(vec![0]))
        .unwrap();

    let inserted = db
        .add_task(
            plan_id,
            &NewTask {
                position: Some(0),
                ..NewTask::titled("Start")
            },
        )
        .unwrap();
    assert_eq!(inserted.order, 0);

    let tasks = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&tasks), ["Start", "A", "B"]);
    assert!(is_contiguous(&tasks));
    // B still depends on A, which moved from 0 to 1.
    assert_eq!(tasks[2].prerequisites, vec![1]);
}

#[test]
fn test_insert_position_out_of_range() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A"]);

    let result = db.add_task(
        plan_id,
        &NewTask {
            position: Some(3),
            ..NewTask::titled("Late")
        },
    );
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    assert_eq!(db.get_tasks(plan_id).unwrap().len(), 1);
}

#[test]
fn test_add_task_to_missing_plan() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.add_task(42, &NewTask::titled("Orphan"));
    assert!(matches!(result, Err(PlannerError::PlanNotFound { id: 42 })));
    assert!(matches!(
        db.fetch_plan_tasks(42),
        Err(PlannerError::PlanNotFound { id: 42 })
    ));
}

#[test]
fn test_update_task_fields() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A"]);
    let id = db.get_tasks(plan_id).unwrap()[0].id;

    let updated = db
        .update_task(
            id,
            &TaskPatch {
                title: Some("A2".to_string()),
                description: Some(Some("details".to_string())),
                status: Some(TaskStatus::Completed),
                due_date: Some(Some(jiff::civil::date(2025, 3, 1))),
                order: None,
            },
        )
        .unwrap();

    assert_eq!(updated.title, "A2");
    assert_eq!(updated.description.as_deref(), Some("details"));
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.due_date, Some(jiff::civil::date(2025, 3, 1)));

    let cleared = db
        .update_task(
            id,
            &TaskPatch {
                description: Some(None),
                due_date: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.due_date, None);
    assert_eq!(cleared.title, "A2");
}

#[test]
fn test_update_task_order_moves_task() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B", "C", "D"]);
    let a = db.get_tasks(plan_id).unwrap()[0].id;

    let moved = db
        .update_task(
            a,
            &TaskPatch {
                order: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(moved.order, 2);
    assert_eq!(titles(&db.get_tasks(plan_id).unwrap()), ["B", "C", "A", "D"]);

    // Past the end clamps to the last position.
    db.update_task(
        a,
        &TaskPatch {
            order: Some(40),
            ..Default::default()
        },
    )
    .unwrap();
    let tasks = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&tasks), ["B", "C", "D", "A"]);
    assert!(is_contiguous(&tasks));
}

#[test]
fn test_update_missing_task() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.update_task(77, &TaskPatch::title("x"));
    assert!(matches!(result, Err(PlannerError::TaskNotFound { id: 77 })));
}

#[test]
fn test_reorder_batch_is_applied_atomically() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B", "C"]);
    let tasks = db.get_tasks(plan_id).unwrap();
    db.set_task_intelligence(tasks[2].id, &with_prerequisites(vec![0]))
        .unwrap();

    // Swap A and C.
    db.reorder_tasks(&[
        TaskOrder::new(tasks[0].id, 2),
        TaskOrder::new(tasks[2].id, 0),
    ])
    .expect("Failed to reorder");

    let reordered = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&reordered), ["C", "B", "A"]);
    assert_eq!(reordered[0].prerequisites, vec![2]);
}

#[test]
fn test_reorder_rejects_bad_batches() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B", "C"]);
    let other_plan = create_plan(&mut db, &["X"]);
    let tasks = db.get_tasks(plan_id).unwrap();
    let x = db.get_tasks(other_plan).unwrap()[0].id;

    assert!(matches!(
        db.reorder_tasks(&[]),
        Err(PlannerError::InvalidInput { .. })
    ));
    assert!(matches!(
        db.reorder_tasks(&[TaskOrder::new(999, 0)]),
        Err(PlannerError::TaskNotFound { id: 999 })
    ));
    assert!(matches!(
        db.reorder_tasks(&[TaskOrder::new(tasks[0].id, 1), TaskOrder::new(x, 0)]),
        Err(PlannerError::InvalidInput { .. })
    ));
    // A onto B's order while B stays put.
    assert!(matches!(
        db.reorder_tasks(&[TaskOrder::new(tasks[0].id, 1)]),
        Err(PlannerError::InvalidInput { .. })
    ));
    // A past the end leaves a gap at 0.
    assert!(matches!(
        db.reorder_tasks(&[TaskOrder::new(tasks[0].id, 7)]),
        Err(PlannerError::InvalidInput { .. })
    ));
    // Shifting every task by one leaves a gap at 0 as well.
    assert!(matches!(
        db.reorder_tasks(&[
            TaskOrder::new(tasks[0].id, 1),
            TaskOrder::new(tasks[1].id, 2),
            TaskOrder::new(tasks[2].id, 3),
        ]),
        Err(PlannerError::InvalidInput { .. })
    ));

    let unchanged = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&unchanged), ["A", "B", "C"]);
    assert!(is_contiguous(&unchanged));
}

#[test]
fn test_missing_prerequisites_are_not_stored() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B"]);
    let b = db.get_tasks(plan_id).unwrap()[1].id;

    let task = db
        .set_task_intelligence(b, &with_prerequisites(vec![5, 0]))
        .unwrap();
    assert_eq!(task.prerequisites, vec![0]);

    let added = db
        .add_task(
            plan_id,
            &NewTask {
                intelligence: with_prerequisites(vec![1, 9]),
                ..NewTask::titled("C")
            },
        )
        .unwrap();
    assert_eq!(added.prerequisites, vec![1]);
    assert_eq!(db.get_task(added.id).unwrap().unwrap().prerequisites, vec![1]);
}

#[test]
fn test_unknown_prerequisite_never_attaches_to_later_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B"]);
    let b = db.get_tasks(plan_id).unwrap()[1].id;
    db.set_task_intelligence(b, &with_prerequisites(vec![5]))
        .unwrap();

    for title in ["C", "D", "E", "F"] {
        db.add_task(plan_id, &NewTask::titled(title)).unwrap();
    }
    db.add_task(
        plan_id,
        &NewTask {
            position: Some(0),
            ..NewTask::titled("Start")
        },
    )
    .unwrap();

    let tasks = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&tasks), ["Start", "A", "B", "C", "D", "E", "F"]);
    let b = tasks.iter().find(|t| t.title == "B").unwrap();
    assert!(b.prerequisites.is_empty());
    assert!(prerequisites_satisfied(b, &tasks));
}

#[test]
fn test_delete_task_compacts_and_remaps() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B", "C"]);
    let tasks = db.get_tasks(plan_id).unwrap();
    db.set_task_intelligence(tasks[2].id, &with_prerequisites(vec![0, 1]))
        .unwrap();

    db.delete_task(tasks[0].id).expect("Failed to delete");

    let remaining = db.get_tasks(plan_id).unwrap();
    assert_eq!(titles(&remaining), ["B", "C"]);
    assert!(is_contiguous(&remaining));
    assert_eq!(remaining[1].prerequisites, vec![0]);

    assert!(matches!(
        db.delete_task(tasks[0].id),
        Err(PlannerError::TaskNotFound { .. })
    ));
}

#[test]
fn test_set_task_intelligence_validates() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A"]);
    let id = db.get_tasks(plan_id).unwrap()[0].id;

    let result = db.set_task_intelligence(
        id,
        &TaskIntelligence {
            estimated_time_hours: Some(-1.0),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));

    let task = db
        .set_task_intelligence(
            id,
            &TaskIntelligence {
                estimated_time_hours: Some(2.5),
                estimated_cost_usd: Some(80.0),
                tools_needed: vec!["Drill".to_string()],
                tags: vec!["diy".to_string()],
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(task.estimated_time_hours, Some(2.5));
    assert_eq!(task.tools_needed, vec!["Drill".to_string()]);
    assert_eq!(task.tags, vec!["diy".to_string()]);
}

#[test]
fn test_list_plans_filters() {
    let (_temp_file, mut db) = create_test_db();
    let kept = db
        .create_plan("local", "Garden", None, PlanStatus::Active)
        .unwrap();
    let archived = db
        .create_plan("local", "Old garage", None, PlanStatus::Active)
        .unwrap();
    db.create_plan("someone", "Garden shed", None, PlanStatus::Active)
        .unwrap();
    db.update_plan_status(archived.id, PlanStatus::Archived)
        .unwrap();

    let mine = db
        .list_plans(&PlanFilter {
            user_id: Some("local".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, kept.id);

    let everything = db
        .list_plans(&PlanFilter {
            user_id: Some("local".to_string()),
            include_archived: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(everything.len(), 2);

    let gardens = db
        .list_plans(&PlanFilter {
            title_contains: Some("garden".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(gardens.len(), 2);

    let stats = db.plan_stats(Some("local")).unwrap();
    assert_eq!((stats.total, stats.active, stats.archived), (2, 1, 1));
}

#[test]
fn test_delete_plan_cascades() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &["A", "B"]);
    db.add_resource(plan_id, "Guide", "https://example.com", ResourceType::Link)
        .unwrap();

    db.delete_plan(plan_id).expect("Failed to delete plan");

    assert!(db.get_plan(plan_id).unwrap().is_none());
    assert!(db.get_tasks(plan_id).unwrap().is_empty());
    assert!(db.get_resources(plan_id).unwrap().is_empty());
    assert!(matches!(
        db.delete_plan(plan_id),
        Err(PlannerError::PlanNotFound { .. })
    ));
}

#[test]
fn test_resources_are_listed_with_plan() {
    let (_temp_file, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, &[]);

    let resource = db
        .add_resource(plan_id, "Tutorial", "https://example.com/v", ResourceType::Video)
        .unwrap();
    assert_eq!(resource.resource_type, ResourceType::Video);

    let plan = db.get_plan(plan_id).unwrap().unwrap();
    assert_eq!(plan.resources.len(), 1);
    assert_eq!(plan.resources[0].url, "https://example.com/v");

    assert!(matches!(
        db.add_resource(999, "x", "y", ResourceType::Other),
        Err(PlannerError::PlanNotFound { id: 999 })
    ));
}
