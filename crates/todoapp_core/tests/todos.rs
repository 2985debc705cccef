use chrono::{Duration, SubsecRound, Utc};
use rusqlite::Connection;
use std::collections::BTreeSet;
use todoapp_core::db::open_db_in_memory;
use todoapp_core::dto::{
    CreateCategoryRequest, CreateTodoRequest, PageRequest, TodoFilter, UpdateTodoRequest,
};
use todoapp_core::model::format_timestamp;
use todoapp_core::{ServiceError, Services};

#[test]
fn created_todo_is_pending_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let created = services
        .todos
        .create(&CreateTodoRequest::new("Buy milk"))
        .unwrap();

    assert!(!created.is_completed);
    assert!(created.updated_at.is_none());
    assert_eq!(created.category_id, 1);
    assert_eq!(created.priority, 1);
    assert!(created.created_at <= Utc::now());
}

#[test]
fn create_with_unknown_category_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut request = CreateTodoRequest::new("Lost");
    request.category_id = Some(999);

    let err = services.todos.create(&request).unwrap_err();
    match err {
        ServiceError::Validation(validation) => assert!(validation.has_field("categoryId")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn create_rejects_past_due_date() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut request = CreateTodoRequest::new("Too late");
    request.due_date = Some(Utc::now() - Duration::hours(1));

    let err = services.todos.create(&request).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn create_with_initial_note_attaches_it() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut request = CreateTodoRequest::new("With note");
    request.initial_note = Some("remember the receipt".to_string());

    let created = services.todos.create(&request).unwrap();
    let notes = services.notes.list_by_todo(created.id).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "remember the receipt");
}

#[test]
fn update_then_get_reflects_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let created = services
        .todos
        .create(&CreateTodoRequest::new("Draft"))
        .unwrap();
    let due = Utc::now() + Duration::days(3) + Duration::nanoseconds(789);

    let request = UpdateTodoRequest {
        title: "Final".to_string(),
        description: "ship it".to_string(),
        is_completed: true,
        due_date: Some(due),
        priority: 3,
        category_id: Some(2),
    };
    let updated = services.todos.update(created.id, &request).unwrap().unwrap();

    let loaded = services.todos.get_by_id(created.id, true).unwrap().unwrap();
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.description, "ship it");
    assert!(loaded.is_completed);
    assert_eq!(loaded.due_date, Some(due.trunc_subsecs(6)));
    assert_eq!(loaded.due_date, updated.due_date);
    assert_eq!(loaded.updated_at, updated.updated_at);
    assert_eq!(loaded.priority, 3);
    assert_eq!(loaded.category_id, 2);
    assert_eq!(loaded.category_name.as_deref(), Some("Business"));
    assert!(loaded.updated_at.is_some());
}

#[test]
fn update_without_category_keeps_current_one() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut request = CreateTodoRequest::new("Categorized");
    request.category_id = Some(3);
    let created = services.todos.create(&request).unwrap();

    let updated = services
        .todos
        .update(created.id, &UpdateTodoRequest::new("Renamed"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.category_id, 3);
}

#[test]
fn update_of_absent_todo_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let result = services
        .todos
        .update(404, &UpdateTodoRequest::new("Nobody"))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn delete_then_get_is_absent_and_repeat_delete_is_false() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    assert!(services.todos.delete(1).unwrap());
    assert!(services.todos.get_by_id(1, false).unwrap().is_none());
    assert!(!services.todos.delete(1).unwrap());
    assert!(!services.todos.delete(12345).unwrap());
}

#[test]
fn overdue_matches_pending_todos_with_past_due_dates() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let now = Utc::now();

    let late = services
        .todos
        .create(&CreateTodoRequest::new("late"))
        .unwrap();
    let late_but_done = services
        .todos
        .create(&CreateTodoRequest::new("late but done"))
        .unwrap();
    let future = services
        .todos
        .create(&CreateTodoRequest::new("future"))
        .unwrap();
    services
        .todos
        .create(&CreateTodoRequest::new("undated"))
        .unwrap();

    set_due_date(&conn, late.id, now - Duration::days(2));
    set_due_date(&conn, late_but_done.id, now - Duration::days(1));
    set_due_date(&conn, future.id, now + Duration::days(1));
    services.todos.mark_completed(late_but_done.id).unwrap();

    let all = services.todos.list(false).unwrap();
    let expected = all
        .iter()
        .filter(|t| !t.is_completed && t.due_date.is_some_and(|due| due < Utc::now()))
        .map(|t| t.id)
        .collect::<BTreeSet<_>>();
    let overdue = services
        .todos
        .get_overdue()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect::<BTreeSet<_>>();

    assert_eq!(overdue, expected);
    assert_eq!(overdue, BTreeSet::from([late.id]));
}

#[test]
fn completing_then_listing_by_status() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let work = services
        .categories
        .create(&CreateCategoryRequest::new("Work"))
        .unwrap();
    let mut request = CreateTodoRequest::new("Pay bills");
    request.priority = 3;
    request.category_id = Some(work.id);
    let bills = services.todos.create(&request).unwrap();

    let completed = services.todos.mark_completed(bills.id).unwrap().unwrap();
    assert!(completed.is_completed);
    assert!(completed.updated_at.is_some());

    let completed_ids = ids(services.todos.get_completed().unwrap());
    let pending_ids = ids(services.todos.get_pending().unwrap());
    assert!(completed_ids.contains(&bills.id));
    assert!(!pending_ids.contains(&bills.id));

    let back = services.todos.mark_pending(bills.id).unwrap().unwrap();
    assert!(!back.is_completed);
    assert!(services.todos.mark_pending(999).unwrap().is_none());
}

#[test]
fn mark_completed_does_not_revalidate_past_due_date() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let created = services
        .todos
        .create(&CreateTodoRequest::new("slipped"))
        .unwrap();
    set_due_date(&conn, created.id, Utc::now() - Duration::days(1));

    let completed = services.todos.mark_completed(created.id).unwrap().unwrap();
    assert!(completed.is_completed);
}

#[test]
fn get_by_priority_filters_and_validates_range() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let medium = ids(services.todos.get_by_priority(2).unwrap());
    assert_eq!(medium, vec![1]);

    let err = services.todos.get_by_priority(4).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn get_by_category_lists_only_that_category() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut request = CreateTodoRequest::new("urgent one");
    request.category_id = Some(3);
    let created = services.todos.create(&request).unwrap();

    assert_eq!(
        ids(services.todos.get_by_category(3).unwrap()),
        vec![created.id]
    );
    assert!(services.todos.get_by_category(2).unwrap().is_empty());
}

#[test]
fn filtered_listing_combines_filters_sort_and_relations() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut high = CreateTodoRequest::new("high");
    high.priority = 3;
    let high = services.todos.create(&high).unwrap();

    let sorted = services
        .todos
        .get_filtered(&TodoFilter {
            category_id: Some(1),
            done: Some(false),
            sort: Some("priority".to_string()),
            include: true,
        })
        .unwrap();
    assert_eq!(ids(sorted.clone()), vec![high.id, 1]);
    assert!(sorted
        .iter()
        .all(|t| t.category_name.as_deref() == Some("General")));

    let plain = services.todos.get_filtered(&TodoFilter::default()).unwrap();
    assert_eq!(plain.len(), 3);
    assert!(plain.iter().all(|t| t.category_name.is_none()));
}

#[test]
fn paged_listing_uses_id_order() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    for index in 0..13 {
        services
            .todos
            .create(&CreateTodoRequest::new(format!("bulk {index}")))
            .unwrap();
    }

    let page = services
        .todos
        .get_paged(&PageRequest::new(2, 5), false)
        .unwrap();
    assert_eq!(page.total_count, 15);
    assert_eq!(ids(page.data), vec![6, 7, 8, 9, 10]);
    assert_eq!(page.total_pages, 3);
}

fn ids(todos: Vec<todoapp_core::dto::TodoDto>) -> Vec<i64> {
    todos.into_iter().map(|t| t.id).collect()
}

fn set_due_date(conn: &Connection, todo_id: i64, due: chrono::DateTime<Utc>) {
    conn.execute(
        "UPDATE todos SET due_date = ?1 WHERE id = ?2;",
        rusqlite::params![format_timestamp(&due), todo_id],
    )
    .unwrap();
}

#[test]
fn status_toggle_response_matches_stored_row() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let created = services
        .todos
        .create(&CreateTodoRequest::new("Toggle me"))
        .unwrap();

    let completed = services.todos.mark_completed(created.id).unwrap().unwrap();
    let loaded = services.todos.get_by_id(created.id, false).unwrap().unwrap();
    assert_eq!(completed, loaded);

    let pending = services.todos.mark_pending(created.id).unwrap().unwrap();
    let loaded = services.todos.get_by_id(created.id, false).unwrap().unwrap();
    assert_eq!(pending, loaded);
    assert_eq!(created.created_at, loaded.created_at);
}
