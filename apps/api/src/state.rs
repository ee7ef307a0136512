use crate::auth::AccountStore;
use crate::config::Config;
use crate::llm_client::StructuredInvoker;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Replaces any ambient session state: accounts and sessions live in `accounts`,
/// and each agent handler receives an explicit `AuthSession`.
#[derive(Clone)]
pub struct AppState {
    pub llm: StructuredInvoker,
    pub accounts: AccountStore,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(backend: std::sync::Arc<crate::llm_client::testing::ScriptedBackend>) -> Self {
        AppState {
            llm: crate::llm_client::testing::invoker(backend),
            accounts: AccountStore::default(),
            config: Config::for_tests(),
        }
    }
}
