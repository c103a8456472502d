//! Integration tests for Store action broadcasting
//!
//! Views subscribe to the broadcast to re-render when a remote result lands,
//! so these tests pin down what is broadcast and when.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use supatodo_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use supatodo_runtime::{Store, StoreError};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start a remote call that resolves after `delay_ms`
    Request { id: u64, delay_ms: u64 },
    /// The remote call resolved
    Responded { id: u64 },
    /// Start a call that never produces an action
    FireAndForget,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    responses: Vec<u64>,
}

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Request { id, delay_ms } => smallvec![Effect::future(async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Some(TestAction::Responded { id })
            })],
            TestAction::Responded { id } => {
                state.responses.push(id);
                SmallVec::new()
            },
            TestAction::FireAndForget => smallvec![Effect::future(async { None })],
        }
    }
}

fn store() -> Store<TestState, TestAction, (), TestReducer> {
    Store::new(TestState::default(), TestReducer, ())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_matching_action() {
    let store = store();

    let result = store
        .send_and_wait_for(
            TestAction::Request { id: 1, delay_ms: 5 },
            |action| matches!(action, TestAction::Responded { id: 1 }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, TestAction::Responded { id: 1 });
}

#[tokio::test]
async fn test_send_and_wait_for_times_out() {
    let store = store();

    let result = store
        .send_and_wait_for(
            TestAction::FireAndForget,
            |action| matches!(action, TestAction::Responded { .. }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn test_broadcast_happens_after_reduce() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store
        .send(TestAction::Request { id: 7, delay_ms: 0 })
        .await
        .unwrap();

    let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("broadcast in time")
        .unwrap();
    assert_eq!(action, TestAction::Responded { id: 7 });

    // State already reflects the broadcast action.
    let responses = store.state(|s| s.responses.clone()).await;
    assert_eq!(responses, vec![7]);
}

#[tokio::test]
async fn test_initial_actions_are_not_broadcast() {
    let store = store();
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(TestAction::FireAndForget).await.unwrap();
    handle.wait().await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_results_applied_in_completion_order() {
    let store = store();

    let mut slow = store
        .send(TestAction::Request { id: 1, delay_ms: 60 })
        .await
        .unwrap();
    let mut fast = store
        .send(TestAction::Request { id: 2, delay_ms: 0 })
        .await
        .unwrap();

    fast.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    slow.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let responses = store.state(|s| s.responses.clone()).await;
    assert_eq!(responses, vec![2, 1]);
}

#[tokio::test]
async fn test_multiple_subscribers_each_receive() {
    let store = store();
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    let mut handle = store
        .send(TestAction::Request { id: 3, delay_ms: 0 })
        .await
        .unwrap();
    handle.wait().await;

    assert_eq!(first.recv().await.unwrap(), TestAction::Responded { id: 3 });
    assert_eq!(second.recv().await.unwrap(), TestAction::Responded { id: 3 });
}
