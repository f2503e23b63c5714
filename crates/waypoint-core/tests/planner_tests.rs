mod common;

use common::{create_plan_with_tasks, create_test_planner, titles};
use waypoint_core::{
    params::{AddResource, CreateTask, Id, ListPlans, UpdatePlanStatus},
    PlanStatus, PlannerError, ResourceType, TaskOrder, TaskPatch, TaskStatus, TaskStore,
};

#[tokio::test]
async fn test_planner_is_a_task_store() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan_with_tasks(&planner, &["A", "B", "C"]).await;
    let tasks = planner.fetch_tasks(plan_id).await.unwrap();

    let updated = planner
        .update_task(tasks[1].id, &TaskPatch::status(TaskStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);

    planner
        .reorder_tasks(&[
            TaskOrder::new(tasks[0].id, 1),
            TaskOrder::new(tasks[1].id, 0),
        ])
        .await
        .unwrap();
    assert_eq!(
        titles(&planner.fetch_tasks(plan_id).await.unwrap()),
        ["B", "A", "C"]
    );

    planner.delete_task(tasks[2].id).await.unwrap();
    assert_eq!(planner.fetch_tasks(plan_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_tasks_unknown_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let result = planner.fetch_tasks(404).await;
    assert!(matches!(result, Err(PlannerError::PlanNotFound { id: 404 })));

    // The lenient listing treats an unknown plan as empty.
    assert!(planner.get_tasks(&Id { id: 404 }).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_task_validates_input() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan_with_tasks(&planner, &[]).await;

    let empty_title = planner
        .add_task(&CreateTask {
            plan_id,
            title: "   ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(empty_title, Err(PlannerError::InvalidInput { .. })));

    let bad_date = planner
        .add_task(&CreateTask {
            plan_id,
            title: "Call plumber".to_string(),
            due_date: Some("next tuesday".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_date, Err(PlannerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_plan_status_lifecycle() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan_with_tasks(&planner, &["A"]).await;

    let plan = planner
        .update_plan_status(&UpdatePlanStatus {
            id: plan_id,
            status: "completed".to_string(),
        })
        .await
        .unwrap()
        .expect("Plan should exist");
    assert_eq!(plan.status, PlanStatus::Completed);

    let missing = planner
        .update_plan_status(&UpdatePlanStatus {
            id: 999,
            status: "active".to_string(),
        })
        .await
        .unwrap();
    assert!(missing.is_none());

    let invalid = planner
        .update_plan_status(&UpdatePlanStatus {
            id: plan_id,
            status: "paused".to_string(),
        })
        .await;
    assert!(matches!(invalid, Err(PlannerError::InvalidInput { .. })));

    let stats = planner.plan_stats().await.unwrap();
    assert_eq!((stats.total, stats.completed), (1, 1));

    let completed = planner
        .list_plans_summary(&ListPlans {
            status: Some("completed".to_string()),
            all: false,
        })
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
}

#[tokio::test]
async fn test_add_resource() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan_with_tasks(&planner, &[]).await;

    let resource = planner
        .add_resource(&AddResource {
            plan_id,
            title: "Permit rules".to_string(),
            url: "https://example.com/permits".to_string(),
            resource_type: Some("document".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(resource.resource_type, ResourceType::Document);

    let plan = planner
        .show_plan(&Id { id: plan_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(plan.resources, vec![resource]);
}
