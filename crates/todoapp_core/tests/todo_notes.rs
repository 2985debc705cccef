use todoapp_core::db::open_db_in_memory;
use todoapp_core::dto::{CreateTodoRequest, TodoNoteRequest};
use todoapp_core::{ServiceError, Services};

#[test]
fn list_by_todo_returns_notes_oldest_first() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let notes = services.notes.list_by_todo(1).unwrap();
    assert_eq!(
        notes.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(services.notes.list_by_todo(2).unwrap().is_empty());
}

#[test]
fn create_appends_note_to_existing_todo() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let created = services
        .notes
        .create(1, &TodoNoteRequest::new("third"))
        .unwrap();
    assert_eq!(created.todo_id, 1);

    let notes = services.notes.list_by_todo(1).unwrap();
    assert_eq!(notes.last().map(|n| n.id), Some(created.id));
}

#[test]
fn create_for_missing_todo_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let err = services
        .notes
        .create(404, &TodoNoteRequest::new("orphan"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id: 404, .. }));
}

#[test]
fn create_rejects_blank_and_oversized_content() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    for content in [String::from("   "), "x".repeat(1001)] {
        let err = services
            .notes
            .create(1, &TodoNoteRequest::new(content))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}

#[test]
fn update_requires_matching_parent() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    let updated = services
        .notes
        .update(1, 1, &TodoNoteRequest::new("edited"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "edited");

    let mismatched = services
        .notes
        .update(2, 1, &TodoNoteRequest::new("nope"))
        .unwrap();
    assert!(mismatched.is_none());
}

#[test]
fn delete_requires_matching_parent() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);

    assert!(!services.notes.delete(2, 1).unwrap());
    assert!(services.notes.delete(1, 1).unwrap());
    assert!(!services.notes.delete(1, 1).unwrap());
    assert_eq!(services.notes.list_by_todo(1).unwrap().len(), 1);
}

#[test]
fn deleting_todo_removes_its_notes() {
    let conn = open_db_in_memory().unwrap();
    let services = Services::new(&conn);
    let mut request = CreateTodoRequest::new("with notes");
    request.initial_note = Some("first".to_string());
    let todo = services.todos.create(&request).unwrap();
    services
        .notes
        .create(todo.id, &TodoNoteRequest::new("second"))
        .unwrap();

    assert!(services.todos.delete(todo.id).unwrap());
    assert!(services.notes.list_by_todo(todo.id).unwrap().is_empty());
}
