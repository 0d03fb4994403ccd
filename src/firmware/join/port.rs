use super::super::types::{EndpointConfig, InitFailure};

/// The radio driver as seen by the supervisor.
///
/// Observers installed here must only post [`NetEvent`](super::super::types::NetEvent)s
/// into the supervisor's event channel; they never touch join state directly.
#[allow(async_fn_in_trait)]
pub trait StationPort {
    fn install_observers(&mut self);

    fn remove_observers(&mut self);

    /// Applies the station config and starts the interface. Errors are fatal.
    async fn bring_up(&mut self, config: &EndpointConfig) -> Result<(), InitFailure>;

    /// Issues one association request. The driver reports the result through events.
    async fn request_join(&mut self) -> Result<(), &'static str>;
}
