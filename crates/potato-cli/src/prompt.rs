use async_trait::async_trait;

/// Blocking user prompts raised by controller actions.
///
/// "Blocking" is from the point of view of the action: the calling task
/// waits for the user, the rest of the UI keeps running.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Show a message and wait until the user acknowledges it.
    async fn alert(&self, message: &str);

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    async fn confirm(&self, message: &str) -> bool;
}
