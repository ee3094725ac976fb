use session_todos::models::*;
use session_todos::sort::{sort_todo_lists, sort_todos};
use speculate2::speculate;

fn titles_of(todos: &[&Todo]) -> Vec<String> {
    todos.iter().map(|todo| todo.title().to_string()).collect()
}

fn list_titles(lists: &[&TodoList]) -> Vec<String> {
    lists.iter().map(|list| list.title().to_string()).collect()
}

speculate! {
    before {
        let ids = SequentialIds::new();
    }

    describe "todo" {
        it "starts undone with a trimmed title" {
            let todo = Todo::create(&ids, "  Buy milk  ").expect("Failed to create todo");

            assert_eq!(todo.title(), "Buy milk");
            assert!(!todo.is_done());
        }

        it "rejects empty and over-long titles" {
            assert_eq!(
                Todo::create(&ids, "   "),
                Err(TodoError::Validation("The todo title is required.".to_string()))
            );
            assert_eq!(
                Todo::create(&ids, &"x".repeat(101)),
                Err(TodoError::Validation("Todo title must be between 1 and 100 characters.".to_string()))
            );
        }

        it "strips byte order marks along with whitespace" {
            assert_eq!(
                Todo::create(&ids, "\u{feff}"),
                Err(TodoError::Validation("The todo title is required.".to_string()))
            );
            let todo = Todo::create(&ids, "\u{feff} Buy milk ").expect("Failed to create todo");
            assert_eq!(todo.title(), "Buy milk");
        }

        it "accepts exactly one hundred characters" {
            let title = "é".repeat(100);
            let todo = Todo::create(&ids, &title).expect("Failed to create todo");
            assert_eq!(todo.title(), title);
        }

        it "marks done and undone idempotently" {
            let mut todo = Todo::create(&ids, "Laundry").expect("Failed to create todo");

            todo.mark_done();
            todo.mark_done();
            assert!(todo.is_done());

            todo.mark_undone();
            todo.mark_undone();
            assert!(!todo.is_done());
        }

        it "toggles and reports the new state" {
            let mut todo = Todo::create(&ids, "Laundry").expect("Failed to create todo");

            assert!(todo.toggle());
            assert!(!todo.toggle());
        }

        it "keeps its old title when a rename is invalid" {
            let mut todo = Todo::create(&ids, "Laundry").expect("Failed to create todo");

            assert!(todo.set_title("").is_err());
            assert_eq!(todo.title(), "Laundry");

            todo.set_title(" Dishes ").expect("Failed to rename");
            assert_eq!(todo.title(), "Dishes");
        }
    }

    describe "todo_list" {
        it "is created empty with a trimmed title" {
            let list = TodoList::create(&ids, "\tGroceries ").expect("Failed to create list");

            assert_eq!(list.title(), "Groceries");
            assert!(list.is_empty());
        }

        it "rejects empty and over-long titles on create and rename" {
            assert!(matches!(TodoList::create(&ids, ""), Err(TodoError::Validation(_))));
            assert!(matches!(
                TodoList::create(&ids, &"a".repeat(101)),
                Err(TodoError::Validation(_))
            ));

            let mut list = TodoList::create(&ids, "Work").expect("Failed to create list");
            assert!(matches!(list.set_title("  "), Err(TodoError::Validation(_))));
            assert_eq!(list.title(), "Work");
        }

        it "assigns increasing ids to lists and todos" {
            let list = TodoList::create(&ids, "A").expect("Failed to create list");
            let todo = Todo::create(&ids, "a").expect("Failed to create todo");
            let other = TodoList::create(&ids, "B").expect("Failed to create list");

            assert!(list.id() < todo.id());
            assert!(todo.id() < other.id());
        }

        it "allows duplicate todo titles" {
            let mut list = TodoList::create(&ids, "Groceries").expect("Failed to create list");
            list.add(Todo::create(&ids, "Milk").expect("Failed to create todo")).expect("Failed to add todo");
            list.add(Todo::create(&ids, "Milk").expect("Failed to create todo")).expect("Failed to add todo");

            assert_eq!(list.len(), 2);
        }

        it "rejects a todo whose id is already in the list" {
            let mut list = TodoList::create(&ids, "Groceries").expect("Failed to create list");
            let milk = Todo::create(&ids, "Milk").expect("Failed to create todo");
            list.add(milk.clone()).expect("Failed to add todo");

            assert!(matches!(list.add(milk), Err(TodoError::Validation(_))));
            assert_eq!(list.len(), 1);
        }

        it "finds todos by id and position" {
            let mut list = TodoList::create(&ids, "Groceries").expect("Failed to create list");
            let milk = Todo::create(&ids, "Milk").expect("Failed to create todo");
            let bread = Todo::create(&ids, "Bread").expect("Failed to create todo");
            let bread_id = bread.id();
            list.add(milk).expect("Failed to add todo");
            list.add(bread).expect("Failed to add todo");

            let found = list.find_by_id(bread_id).expect("Bread should be found");
            assert_eq!(found.title(), "Bread");
            assert_eq!(list.find_index_of(found), Some(1));
            assert!(list.find_by_id(9_999).is_none());
        }

        it "ignores removal at an out-of-range index" {
            let mut list = TodoList::create(&ids, "Groceries").expect("Failed to create list");
            list.add(Todo::create(&ids, "Milk").expect("Failed to create todo")).expect("Failed to add todo");

            assert!(list.remove_at(5).is_none());
            assert_eq!(list.len(), 1);

            let removed = list.remove_at(0).expect("Milk should be removed");
            assert_eq!(removed.title(), "Milk");
            assert!(list.is_empty());
        }

        it "is done only when non-empty and every todo is done" {
            let mut list = TodoList::create(&ids, "Chores").expect("Failed to create list");
            assert!(!list.is_done());

            for title in ["Sweep", "Mop", "Dust"] {
                list.add(Todo::create(&ids, title).expect("Failed to create todo")).expect("Failed to add todo");
            }
            assert!(!list.is_done());
            assert_eq!(list.remaining(), 3);

            list.mark_all_done();
            assert!(list.is_done());
            assert_eq!(list.remaining(), 0);
        }

        it "round trips through its plain record" {
            let mut list = TodoList::create(&ids, "Groceries").expect("Failed to create list");
            list.add(Todo::create(&ids, "Milk").expect("Failed to create todo")).expect("Failed to add todo");
            list.add(Todo::create(&ids, "Bread").expect("Failed to create todo")).expect("Failed to add todo");
            list.mark_all_done();
            list.add(Todo::create(&ids, "Eggs").expect("Failed to create todo")).expect("Failed to add todo");

            let restored = TodoList::from_record(list.to_record()).expect("Failed to restore");
            assert_eq!(restored, list);
        }

        it "round trips through JSON" {
            let mut list = TodoList::create(&ids, "Groceries").expect("Failed to create list");
            list.add(Todo::create(&ids, "Milk").expect("Failed to create todo")).expect("Failed to add todo");

            let json = serde_json::to_string(&list.to_record()).expect("Failed to serialize");
            let record: TodoListRecord = serde_json::from_str(&json).expect("Failed to parse");
            assert_eq!(TodoList::from_record(record).expect("Failed to restore"), list);
        }

        it "refuses records with duplicate todo ids" {
            let record = TodoListRecord {
                id: 1,
                title: "Broken".to_string(),
                todos: vec![
                    TodoRecord { id: 2, title: "a".to_string(), done: false },
                    TodoRecord { id: 2, title: "b".to_string(), done: true },
                ],
            };

            assert!(matches!(TodoList::from_record(record), Err(TodoError::Validation(_))));
        }
    }

    describe "list_collection" {
        before {
            let mut lists = ListCollection::new();
        }

        it "creates lists in order" {
            lists.create_list(&ids, "Work").expect("Failed to create");
            lists.create_list(&ids, "Home").expect("Failed to create");

            let titles: Vec<_> = lists.lists().iter().map(TodoList::title).collect();
            assert_eq!(titles, vec!["Work", "Home"]);
        }

        it "treats titles differing only in case as duplicates" {
            lists.create_list(&ids, "Work").expect("Failed to create");

            let result = lists.create_list(&ids, "work");
            assert_eq!(
                result.map(|list| list.id()),
                Err(TodoError::DuplicateTitle { title: "work".to_string() })
            );
            assert_eq!(lists.len(), 1);
        }

        it "compares titles after trimming" {
            lists.create_list(&ids, "Work").expect("Failed to create");

            assert!(!lists.is_title_unique("  WORK ", None));
            assert!(lists.is_title_unique("Workshop", None));
        }

        it "treats a title of byte order marks as missing" {
            let result = lists.create_list(&ids, "\u{feff}\u{feff}").map(|list| list.id());
            assert_eq!(
                result,
                Err(TodoError::Validation("The list title is required.".to_string()))
            );
        }

        it "reports the highest list or todo id" {
            assert_eq!(lists.max_id(), None);

            let work = lists.create_list(&ids, "Work").expect("Failed to create").id();
            let home = lists.create_list(&ids, "Home").expect("Failed to create").id();
            assert_eq!(lists.max_id(), Some(home));

            let todo = lists.add_todo(&ids, work, "Report").expect("Failed to add").id();
            assert_eq!(lists.max_id(), Some(todo));
        }

        it "reports validation before uniqueness" {
            let result = lists.create_list(&ids, "   ").map(|list| list.id());
            assert_eq!(
                result,
                Err(TodoError::Validation("The list title is required.".to_string()))
            );
        }

        it "lets a list be renamed to a re-cased version of its own title" {
            let id = lists.create_list(&ids, "Work").expect("Failed to create").id();

            let renamed = lists.rename_list(id, "WORK").expect("Failed to rename");
            assert_eq!(renamed.title(), "WORK");
        }

        it "refuses renaming onto another list's title" {
            lists.create_list(&ids, "Work").expect("Failed to create");
            let home = lists.create_list(&ids, "Home").expect("Failed to create").id();

            let result = lists.rename_list(home, "work").map(|list| list.id());
            assert!(matches!(result, Err(TodoError::DuplicateTitle { .. })));
            assert_eq!(lists.find(home).map(TodoList::title), Some("Home"));
        }

        it "reports missing lists on rename" {
            let result = lists.rename_list(42, "Anything").map(|list| list.id());
            assert!(matches!(
                result,
                Err(TodoError::NotFound { resource: Resource::TodoList, id: 42 })
            ));
        }

        it "cascades list deletion to its todos" {
            let list_id = lists.create_list(&ids, "Groceries").expect("Failed to create").id();
            let milk = lists.add_todo(&ids, list_id, "Milk").expect("Failed to add").id();

            let removed = lists.remove_list(list_id).expect("Failed to remove");
            assert_eq!(removed.len(), 1);
            assert!(lists.find(list_id).is_none());
            assert!(lists.find_todo(list_id, milk).is_none());
        }

        it "reports missing lists on delete" {
            assert!(matches!(lists.remove_list(7), Err(TodoError::NotFound { .. })));
        }

        it "toggles and deletes todos" {
            let list_id = lists.create_list(&ids, "Groceries").expect("Failed to create").id();
            let milk = lists.add_todo(&ids, list_id, "Milk").expect("Failed to add").id();

            assert!(lists.toggle_todo(list_id, milk).expect("Failed to toggle").is_done());
            assert!(!lists.toggle_todo(list_id, milk).expect("Failed to toggle").is_done());

            let deleted = lists.delete_todo(list_id, milk).expect("Failed to delete");
            assert_eq!(deleted.title(), "Milk");
            assert!(matches!(
                lists.delete_todo(list_id, milk),
                Err(TodoError::NotFound { resource: Resource::Todo, .. })
            ));
        }

        it "reports a missing list before validating a todo title" {
            let result = lists.add_todo(&ids, 99, "").map(|todo| todo.id());
            assert!(matches!(
                result,
                Err(TodoError::NotFound { resource: Resource::TodoList, id: 99 })
            ));
        }

        it "completes every todo of a list" {
            let list_id = lists.create_list(&ids, "Chores").expect("Failed to create").id();
            for title in ["Sweep", "Mop", "Dust"] {
                lists.add_todo(&ids, list_id, title).expect("Failed to add");
            }

            assert!(lists.complete_all(list_id).expect("Failed to complete").is_done());
        }

        it "round trips through plain records" {
            let list_id = lists.create_list(&ids, "Groceries").expect("Failed to create").id();
            lists.add_todo(&ids, list_id, "Milk").expect("Failed to add");
            lists.create_list(&ids, "Empty").expect("Failed to create");

            let restored = ListCollection::from_records(lists.to_records()).expect("Failed to restore");
            assert_eq!(restored, lists);
        }
    }

    describe "sort" {
        it "orders the groceries scenario undone first" {
            let mut lists = ListCollection::new();
            let list_id = lists.create_list(&ids, "Groceries").expect("Failed to create").id();
            let milk = lists.add_todo(&ids, list_id, "Milk").expect("Failed to add").id();
            lists.add_todo(&ids, list_id, "Bread").expect("Failed to add");
            lists.toggle_todo(list_id, milk).expect("Failed to toggle");

            let list = lists.find(list_id).expect("List should exist");
            assert_eq!(titles_of(&sort_todos(list)), vec!["Bread", "Milk"]);
        }

        it "puts every undone list before every done list" {
            let mut lists = ListCollection::new();
            let done_a = lists.create_list(&ids, "a done").expect("Failed to create").id();
            lists.add_todo(&ids, done_a, "x").expect("Failed to add");
            lists.complete_all(done_a).expect("Failed to complete");
            lists.create_list(&ids, "Z empty").expect("Failed to create");
            let pending = lists.create_list(&ids, "m pending").expect("Failed to create").id();
            lists.add_todo(&ids, pending, "y").expect("Failed to add");

            let sorted = sort_todo_lists(lists.lists());
            assert_eq!(list_titles(&sorted), vec!["m pending", "Z empty", "a done"]);

            let first_done = sorted.iter().position(|list| list.is_done()).expect("A done list");
            assert!(sorted[first_done..].iter().all(|list| list.is_done()));
        }

        it "is idempotent" {
            let mut lists = ListCollection::new();
            for title in ["pear", "Apple", "banana"] {
                lists.create_list(&ids, title).expect("Failed to create");
            }

            let once = sort_todo_lists(lists.lists());
            let twice = sort_todo_lists(once.iter().copied());
            assert_eq!(list_titles(&once), list_titles(&twice));
        }

        it "keeps case-only ties in their original order" {
            let mut list = TodoList::create(&ids, "Fruit").expect("Failed to create list");
            list.add(Todo::create(&ids, "apple").expect("Failed to create todo")).expect("Failed to add todo");
            list.add(Todo::create(&ids, "Apple").expect("Failed to create todo")).expect("Failed to add todo");

            assert_eq!(titles_of(&sort_todos(&list)), vec!["apple", "Apple"]);

            let mut reversed = TodoList::create(&ids, "Fruit").expect("Failed to create list");
            reversed.add(Todo::create(&ids, "Apple").expect("Failed to create todo")).expect("Failed to add todo");
            reversed.add(Todo::create(&ids, "apple").expect("Failed to create todo")).expect("Failed to add todo");

            assert_eq!(titles_of(&sort_todos(&reversed)), vec!["Apple", "apple"]);
        }
    }
}
