use lazytodo_core::{
    InMemoryTodoRepository, NewTodo, Priority, RepoError, Todo, TodoListQuery, TodoRepository,
    TodoService, TodoUpdate, SAMPLE_TODOS,
};
use std::collections::HashSet;
use uuid::Uuid;

fn seeded() -> TodoService<InMemoryTodoRepository> {
    TodoService::seeded().unwrap()
}

#[test]
fn list_without_limit_returns_seed_in_insertion_order() {
    let service = seeded();
    let todos = service.list_todos(None).unwrap();

    assert_eq!(todos.len(), SAMPLE_TODOS.len());
    for (todo, (title, description, priority)) in todos.iter().zip(SAMPLE_TODOS) {
        assert_eq!(todo.title, *title);
        assert_eq!(todo.description, *description);
        assert_eq!(todo.priority, *priority);
    }
}

#[test]
fn seeded_ids_are_unique() {
    let service = seeded();
    let ids = service
        .list_todos(None)
        .unwrap()
        .into_iter()
        .map(|todo| todo.id)
        .collect::<HashSet<_>>();

    assert_eq!(ids.len(), SAMPLE_TODOS.len());
}

#[test]
fn list_with_limit_returns_front_and_clips() {
    let service = seeded();
    let all = service.list_todos(None).unwrap();

    assert_eq!(service.list_todos(Some(2)).unwrap(), all[..2].to_vec());
    assert_eq!(service.list_todos(Some(0)).unwrap(), Vec::<Todo>::new());
    assert_eq!(service.list_todos(Some(100)).unwrap(), all);
}

#[test]
fn create_appends_with_fresh_id_and_get_roundtrips() {
    let mut service = seeded();
    let existing = service
        .list_todos(None)
        .unwrap()
        .into_iter()
        .map(|todo| todo.id)
        .collect::<HashSet<_>>();

    let created = service
        .create_todo(&NewTodo::new("Test task", "A test", Priority::Medium))
        .unwrap();

    assert!(!existing.contains(&created.id));
    assert_eq!(service.len(), SAMPLE_TODOS.len() + 1);
    assert_eq!(service.list_todos(None).unwrap().last(), Some(&created));
    assert_eq!(service.get_todo(created.id).unwrap(), created);
}

#[test]
fn create_rejects_invalid_input() {
    let mut service = TodoService::new(InMemoryTodoRepository::new());

    let err = service
        .create_todo(&NewTodo::new("ok?", "tiny", Priority::Low))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(service.is_empty());
}

#[test]
fn get_missing_returns_not_found() {
    let service = seeded();
    let missing = Uuid::new_v4();

    let err = service.get_todo(missing).unwrap_err();
    assert_eq!(err, RepoError::NotFound(missing));
}

#[test]
fn update_missing_returns_not_found() {
    let mut service = seeded();
    let missing = Uuid::new_v4();

    let err = service
        .update_todo(
            missing,
            &TodoUpdate {
                title: Some("Renamed".to_string()),
                ..TodoUpdate::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, RepoError::NotFound(missing));
}

#[test]
fn update_single_field_changes_only_that_field() {
    let mut service = seeded();
    let before = service.list_todos(Some(1)).unwrap().remove(0);

    let after = service
        .update_todo(
            before.id,
            &TodoUpdate {
                description: Some("Go to gym at 1800".to_string()),
                ..TodoUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.title, before.title);
    assert_eq!(after.priority, before.priority);
    assert_eq!(after.description, "Go to gym at 1800");
    assert_eq!(service.get_todo(before.id).unwrap(), after);
}

#[test]
fn update_can_set_highest_priority() {
    let mut service = seeded();
    let last = service.list_todos(None).unwrap().pop().unwrap();
    assert_eq!(last.priority, Priority::Low);

    let updated = service
        .update_todo(
            last.id,
            &TodoUpdate {
                priority: Some(Priority::High),
                ..TodoUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.priority, Priority::High);
}

#[test]
fn update_with_invalid_field_leaves_record_untouched() {
    let mut service = seeded();
    let before = service.list_todos(Some(1)).unwrap().remove(0);

    let err = service
        .update_todo(
            before.id,
            &TodoUpdate {
                title: Some("x".to_string()),
                priority: Some(Priority::Low),
                ..TodoUpdate::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(service.get_todo(before.id).unwrap(), before);
}

#[test]
fn delete_removes_and_returns_record() {
    let mut service = seeded();
    let target = service.list_todos(None).unwrap()[2].clone();

    let deleted = service.delete_todo(target.id).unwrap();
    assert_eq!(deleted, target);
    assert_eq!(service.len(), SAMPLE_TODOS.len() - 1);
    assert_eq!(
        service.get_todo(target.id).unwrap_err(),
        RepoError::NotFound(target.id)
    );
    assert_eq!(
        service.delete_todo(target.id).unwrap_err(),
        RepoError::NotFound(target.id)
    );
}

#[test]
fn repository_rejects_duplicate_ids() {
    let mut repo = InMemoryTodoRepository::new();
    let todo = Todo::new("Buy groceries", "Milk, Bread, and Eggs", Priority::High).unwrap();

    repo.insert(todo.clone()).unwrap();
    let err = repo.insert(todo.clone()).unwrap_err();

    assert_eq!(err, RepoError::Duplicate(todo.id));
    assert_eq!(repo.list(&TodoListQuery::default()).unwrap().len(), 1);
}
