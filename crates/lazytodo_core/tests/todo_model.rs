use lazytodo_core::{
    CreateTodoRequest, NewTodo, Priority, Todo, TodoUpdate, TodoValidationError,
    UpdateTodoRequest,
};
use uuid::Uuid;

#[test]
fn todo_new_assigns_distinct_ids() {
    let first = Todo::new("Go to gym", "Go to gym at 1700", Priority::High).unwrap();
    let second = Todo::new("Go to gym", "Go to gym at 1700", Priority::High).unwrap();

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.priority, Priority::High);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Todo::with_id(Uuid::nil(), "title", "description", Priority::Low).unwrap_err();
    assert_eq!(err, TodoValidationError::NilId);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let todo = Todo::with_id(id, "Test task", "A test", Priority::Medium).unwrap();

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["title"], "Test task");
    assert_eq!(json["description"], "A test");
    assert_eq!(json["priority"], 2);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn new_todo_defaults_priority_to_low() {
    let payload: NewTodo = serde_json::from_value(serde_json::json!({
        "title": "Water plants",
        "description": "Both balconies"
    }))
    .unwrap();

    assert_eq!(payload.priority, Priority::Low);
    assert!(payload.violations().is_empty());
}

#[test]
fn priority_rejects_unknown_ordinal() {
    let err = serde_json::from_value::<NewTodo>(serde_json::json!({
        "title": "Water plants",
        "description": "Both balconies",
        "priority": 7
    }))
    .unwrap_err();

    assert!(err.to_string().contains("Input should be 1, 2 or 3"), "{err}");
}

#[test]
fn new_todo_reports_every_violation() {
    let payload = NewTodo::new("ab", "abc", Priority::Low);
    let violations = payload.violations();

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].field(), "title");
    assert_eq!(violations[0].kind(), "string_too_short");
    assert_eq!(violations[1].field(), "description");
}

#[test]
fn update_tracks_presence_explicitly() {
    let update: TodoUpdate = serde_json::from_value(serde_json::json!({
        "title": null,
        "priority": 1
    }))
    .unwrap();

    assert_eq!(update.title, None);
    assert_eq!(update.description, None);
    assert_eq!(update.priority, Some(Priority::High));
    assert!(!update.is_empty());
    assert!(TodoUpdate::default().is_empty());
}

#[test]
fn update_rejects_present_empty_title() {
    let update = TodoUpdate {
        title: Some(String::new()),
        ..TodoUpdate::default()
    };

    let violations = update.violations();
    assert_eq!(violations, vec![TodoValidationError::TitleTooShort { chars: 0 }]);
}

#[test]
fn apply_overwrites_only_present_fields() {
    let mut todo = Todo::new("Call mom", "Catch up with mom over the phone", Priority::High).unwrap();
    let before = todo.clone();

    todo.apply(&TodoUpdate {
        priority: Some(Priority::Low),
        ..TodoUpdate::default()
    });

    assert_eq!(todo.id, before.id);
    assert_eq!(todo.title, before.title);
    assert_eq!(todo.description, before.description);
    assert_eq!(todo.priority, Priority::Low);
}

#[test]
fn create_request_collects_priority_with_length_violations() {
    let request: CreateTodoRequest = serde_json::from_value(serde_json::json!({
        "title": "ab",
        "description": "x",
        "priority": 9
    }))
    .unwrap();

    let violations = request.into_new_todo().unwrap_err();
    assert_eq!(
        violations,
        vec![
            TodoValidationError::TitleTooShort { chars: 2 },
            TodoValidationError::DescriptionTooShort { chars: 1 },
            TodoValidationError::InvalidPriority(9),
        ]
    );
    assert_eq!(violations[2].field(), "priority");
    assert_eq!(violations[2].kind(), "enum");
}

#[test]
fn create_request_defaults_priority_and_converts() {
    let request: CreateTodoRequest = serde_json::from_value(serde_json::json!({
        "title": "Water plants",
        "description": "Both balconies"
    }))
    .unwrap();

    let payload = request.into_new_todo().unwrap();
    assert_eq!(
        payload,
        NewTodo::new("Water plants", "Both balconies", Priority::Low)
    );
}

#[test]
fn update_request_checks_only_present_fields() {
    let request: UpdateTodoRequest = serde_json::from_value(serde_json::json!({
        "priority": -4
    }))
    .unwrap();
    assert_eq!(
        request.into_update().unwrap_err(),
        vec![TodoValidationError::InvalidPriority(-4)]
    );

    let request: UpdateTodoRequest = serde_json::from_value(serde_json::json!({
        "description": null,
        "priority": 1
    }))
    .unwrap();
    let update = request.into_update().unwrap();
    assert_eq!(update.description, None);
    assert_eq!(update.priority, Some(Priority::High));
}
