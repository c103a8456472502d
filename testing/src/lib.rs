//! # Supatodo Testing
//!
//! Testing utilities for reducers built on `supatodo-core`.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for a single reducer step
//! - Assertion helpers for returned effects
//! - [`resolve_effects`], which drives effect futures inline so a test can
//!   feed their actions back by hand without a running `Store`
//!
//! ## Example
//!
//! ```ignore
//! use supatodo_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(TaskReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TaskState::default())
//!     .when_action(TaskAction::AddTask)
//!     .then_state(|state| assert!(state.tasks.is_empty()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions, resolve_effects};
