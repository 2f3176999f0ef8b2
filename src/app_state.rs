use crate::{client::PaapiClient, types::Credentials};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: PaapiClient,
    /// Credentials used by `/products/fetch`; None until configured
    pub credentials: Option<Credentials>,
}

impl AppState {
    pub fn new(client: PaapiClient, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}
