//! Simplified action trait for the common case.
//!
//! [`SimpleAction`] reduces boilerplate for actions that take input,
//! produce output, and don't need flow-control (branching, waiting, etc.).
//! A blanket impl automatically adapts `SimpleAction` into `ProcessAction`,
//! so simple actions work with the entire execution pipeline unchanged.

use async_trait::async_trait;

use crate::action::Action;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::result::ActionResult;
use crate::types::ProcessAction;

/// Simplified action trait — the 80% case.
///
/// Action authors implement [`run`](SimpleAction::run) returning
/// `Result<Output, ActionError>`. The framework wraps the output in
/// `ActionResult::success(output)` automatically.
///
/// For flow-control (branching, waiting, retrying) implement
/// [`ProcessAction`] directly instead.
///
/// # Example
///
/// ```rust,ignore
/// use floe_action::prelude::*;
/// use floe_action::SimpleAction;
/// use async_trait::async_trait;
///
/// struct DoubleAction { meta: ActionMetadata }
///
/// impl Action for DoubleAction {
///     fn metadata(&self) -> &ActionMetadata { &self.meta }
/// }
///
/// #[async_trait]
/// impl SimpleAction for DoubleAction {
///     type Input = i64;
///     type Output = i64;
///
///     async fn run(&self, input: i64, _ctx: &ActionContext) -> Result<i64, ActionError> {
///         Ok(input * 2)
///     }
/// }
/// ```
#[async_trait]
pub trait SimpleAction: Action {
    /// Input data type received from upstream nodes.
    type Input: Send + Sync + 'static;
    /// Output data type passed to downstream nodes.
    type Output: Send + Sync + 'static;

    /// Execute the action, returning the output directly.
    ///
    /// The blanket `ProcessAction` impl wraps the return value in
    /// `ActionResult::success(output)`.
    async fn run(
        &self,
        input: Self::Input,
        ctx: &ActionContext,
    ) -> Result<Self::Output, ActionError>;
}

/// Blanket impl: every `SimpleAction` is automatically a `ProcessAction`.
#[async_trait]
impl<T> ProcessAction for T
where
    T: SimpleAction + Send + Sync + 'static,
    T::Input: Send + Sync + 'static,
    T::Output: Send + Sync + 'static,
{
    type Input = T::Input;
    type Output = T::Output;

    async fn execute(
        &self,
        input: Self::Input,
        ctx: &ActionContext,
    ) -> Result<ActionResult<Self::Output>, ActionError> {
        let output = self.run(input, ctx).await?;
        Ok(ActionResult::success(output))
    }
}
