use construct_client_core::{Client, MemoryStorage};
use construct_shared::const_config::client::CLIENT_TOKEN_STORAGE_KEY;
use wiremock::MockServer;

pub struct TestApp {
    pub server: MockServer,
    pub core_client: Client,
    /// Shares its values with the storage handed to `core_client`
    pub storage: MemoryStorage,
}

impl TestApp {
    pub fn stored_token(&self) -> Option<String> {
        use construct_client_core::KeyValueStorage as _;
        self.storage
            .get(CLIENT_TOKEN_STORAGE_KEY)
            .expect("memory storage does not fail")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_storage(MemoryStorage::default()).await
}

pub async fn spawn_app_logged_in() -> TestApp {
    spawn_app_with_storage(MemoryStorage::with_value(CLIENT_TOKEN_STORAGE_KEY, "T")).await
}

async fn spawn_app_with_storage(storage: MemoryStorage) -> TestApp {
    let server = MockServer::start().await;
    let core_client = Client::new(server.uri(), Box::new(storage.clone()));
    TestApp {
        server,
        core_client,
        storage,
    }
}

pub fn no_cb() {}
