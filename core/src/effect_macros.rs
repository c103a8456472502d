//! Declarative macros for ergonomic effect construction
//!
//! Remote calls all have the same shape: await a `Result`, then map the
//! success and the failure to an action. [`async_effect!`](crate::async_effect)
//! writes that match once.

/// Create an `Effect::Future` from a fallible async call
///
/// The `call` expression is evaluated inside an `async move` block, so any
/// handles it uses must be owned (clone them before the macro).
///
/// # Example
///
/// ```
/// use supatodo_core::{async_effect, effect::Effect};
///
/// #[derive(Debug, PartialEq)]
/// enum Action {
///     Loaded(u32),
///     Failed(String),
/// }
///
/// async fn load() -> Result<u32, String> {
///     Ok(3)
/// }
///
/// let effect: Effect<Action> = async_effect! {
///     call: load(),
///     on_success: |value| Some(Action::Loaded(value)),
///     on_error: |error| Some(Action::Failed(error))
/// };
/// assert!(effect.is_future());
/// ```
#[macro_export]
macro_rules! async_effect {
    (
        call: $call:expr,
        on_success: |$success_param:pat_param| $success_body:expr,
        on_error: |$error_param:pat_param| $error_body:expr $(,)?
    ) => {
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            match $call.await {
                ::std::result::Result::Ok($success_param) => $success_body,
                ::std::result::Result::Err($error_param) => $error_body,
            }
        }))
    };
}
