//! Tests for #[derive(Action)] macro

use supatodo_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ListAction {
    #[command]
    AddItem { text: String },

    #[command]
    Refresh,

    #[command]
    Remove(u32),

    #[event]
    ItemAdded { id: u32, text: String },

    #[event]
    Removed(u32),

    #[event]
    Refreshed,

    Noise,
}

#[test]
fn test_is_command() {
    let action = ListAction::AddItem {
        text: "milk".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = ListAction::ItemAdded {
        id: 1,
        text: "milk".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_all_variant_shapes() {
    let commands = vec![
        ListAction::AddItem {
            text: "x".to_string(),
        },
        ListAction::Refresh,
        ListAction::Remove(3),
    ];
    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
    }

    let events = vec![
        ListAction::ItemAdded {
            id: 2,
            text: "y".to_string(),
        },
        ListAction::Removed(3),
        ListAction::Refreshed,
    ];
    for event in events {
        assert!(event.is_event(), "Expected event: {event:?}");
        assert!(!event.is_command(), "Should not be command: {event:?}");
    }
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!ListAction::Noise.is_command());
    assert!(!ListAction::Noise.is_event());
}

#[test]
fn test_names() {
    assert_eq!(ListAction::Refresh.name(), "Refresh");
    assert_eq!(ListAction::Remove(1).name(), "Remove");
    assert_eq!(
        ListAction::ItemAdded {
            id: 1,
            text: String::new()
        }
        .name(),
        "ItemAdded"
    );
    assert_eq!(ListAction::Noise.name(), "Noise");
}
