use crate::shared::errors::AppResult;
/// Base trait for use cases that run once and return a result.
///
/// Stream-producing use cases (bookmark observation, paged feeds) expose
/// their own `observe`/`invoke` methods instead, since they hand back a live
/// subscription rather than a single value.
///
/// # Example
///
/// ```rust,ignore
/// struct ToggleBookmarkUseCase {
///     repository: Arc<dyn MovieRepository>,
/// }
///
/// #[async_trait]
/// impl UseCase<Movie, ()> for ToggleBookmarkUseCase {
///     async fn execute(&self, movie: Movie) -> AppResult<()> {
///         // Use case logic here
///     }
/// }
/// ```
use async_trait::async_trait;

/// Base trait for use cases (command handlers)
#[async_trait]
pub trait UseCase<TCommand, TResult> {
    /// Execute the use case with the given command
    async fn execute(&self, command: TCommand) -> AppResult<TResult>;
}
