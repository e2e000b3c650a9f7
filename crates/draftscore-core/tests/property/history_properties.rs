use draftscore_core::history::{create_version_store, MemoryStore, VersionHistory};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Save(String),
    Back,
    Forward,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => "[a-c]{1,2}".prop_map(Command::Save),
        1 => Just(Command::Back),
        1 => Just(Command::Forward),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_under_any_command_sequence(commands in prop::collection::vec(command(), 0..40)) {
        let mut history = VersionHistory::new();
        for command in commands {
            let before = history.clone();
            match command {
                Command::Save(content) => {
                    let at_cursor = history.draft().map(str::to_string);
                    let outcome = history.save(content.clone());
                    if at_cursor.as_deref() == Some(content.as_str()) {
                        prop_assert!(!outcome.success());
                        prop_assert_eq!(&history, &before);
                    } else {
                        let view = history.current().unwrap();
                        prop_assert_eq!(view.content, content);
                        prop_assert_eq!(Some(view.version_number), outcome.version_number());
                        prop_assert!(!view.can_go_forward);
                    }
                }
                Command::Back => {
                    if history.go_back().is_none() {
                        prop_assert_eq!(&history, &before);
                    }
                }
                Command::Forward => {
                    if history.go_forward().is_none() {
                        prop_assert_eq!(&history, &before);
                    }
                }
            }
            prop_assert!(history.check_invariants().is_ok());
        }
    }

    #[test]
    fn persisted_store_matches_in_memory_history(commands in prop::collection::vec(command(), 1..30)) {
        let mut expected = VersionHistory::new();
        let mut store = create_version_store("prop", MemoryStore::new()).unwrap();

        for command in commands {
            match command {
                Command::Save(content) => {
                    prop_assert_eq!(store.save_version(content.clone()).unwrap(), expected.save(content));
                }
                Command::Back => {
                    prop_assert_eq!(store.go_back().unwrap(), expected.go_back());
                }
                Command::Forward => {
                    prop_assert_eq!(store.go_forward().unwrap(), expected.go_forward());
                }
            }
        }

        let reopened = create_version_store("prop", store.into_backend()).unwrap();
        prop_assert_eq!(reopened.get_current_version(), expected.current());
        prop_assert_eq!(reopened.history().len(), expected.len());
    }
}
