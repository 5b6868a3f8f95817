use reqwest::Client;

/// Shared HTTP client for the collection service.
///
/// No request timeout is configured: a request that never resolves keeps the
/// caller pending.
#[derive(Clone, Default)]
pub struct RestClient {
    pub client: Client,
}

impl RestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}
