use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use creatorlink_core::{
    Confirmation, ConnectionStore, ConnectionsBackend, OAuthBackend, PlatformCatalog,
};
use creatorlink_domain::{
    CreatorLinkError, InitiateConnectionRequest, OAuthInitiation, OAuthStatus, Platform,
    PlatformStatus, Result, SocialConnection,
};

/// One scripted answer to a status poll.
pub enum StatusStep {
    Status(OAuthStatus),
    /// The status request itself fails.
    NetworkError,
    /// The user closes the window while the backend still reports pending.
    UserClosesWindow(Arc<AtomicBool>),
}

/// In-memory backend recording every call it receives.
#[derive(Default)]
pub struct MockBackend {
    connections: Mutex<Vec<SocialConnection>>,
    platforms: Mutex<Vec<Platform>>,
    statuses: Mutex<VecDeque<StatusStep>>,
    initiate_requests: Mutex<Vec<InitiateConnectionRequest>>,
    calls: Mutex<Vec<String>>,
    pub fail_get_connection: AtomicBool,
    pub fail_refresh: AtomicBool,
    pub fail_automation: AtomicBool,
    pub fail_delete: AtomicBool,
    evict_from: Mutex<Option<Arc<ConnectionStore>>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_platform(&self, platform: Platform) {
        self.platforms.lock().unwrap().push(platform);
    }

    pub fn add_connection(&self, connection: SocialConnection) {
        self.connections.lock().unwrap().push(connection);
    }

    /// Replace the backend copy of a platform (catalog drift after load).
    pub fn set_platform_status(&self, id: &str, status: PlatformStatus) {
        for platform in self.platforms.lock().unwrap().iter_mut().filter(|p| p.id == id) {
            platform.status = status;
        }
    }

    /// Drop the target connection from `store` while a refresh or automation
    /// call is in flight, as a concurrent reload would.
    pub fn evict_during_calls(&self, store: Arc<ConnectionStore>) {
        *self.evict_from.lock().unwrap() = Some(store);
    }

    fn evict(&self, id: &str) {
        if let Some(store) = self.evict_from.lock().unwrap().as_ref() {
            store.remove(id);
        }
    }

    pub fn remove_platform(&self, id: &str) {
        self.platforms.lock().unwrap().retain(|p| p.id != id);
    }

    /// Queue status answers; once exhausted every poll reports pending.
    pub fn script(&self, steps: impl IntoIterator<Item = StatusStep>) {
        self.statuses.lock().unwrap().extend(steps);
    }

    pub fn pending(count: usize) -> impl Iterator<Item = StatusStep> {
        (0..count).map(|_| StatusStep::Status(OAuthStatus::pending()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| call.as_str() == name).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn initiate_requests(&self) -> Vec<InitiateConnectionRequest> {
        self.initiate_requests.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn fail_if(flag: &AtomicBool, what: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(CreatorLinkError::Network(format!("{what} failed")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ConnectionsBackend for MockBackend {
    async fn list_connections(&self) -> Result<Vec<SocialConnection>> {
        self.record("list_connections");
        Ok(self.connections.lock().unwrap().clone())
    }

    async fn get_connection(&self, id: &str) -> Result<SocialConnection> {
        self.record("get_connection");
        Self::fail_if(&self.fail_get_connection, "get connection")?;
        self.connections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CreatorLinkError::NotFound(id.to_string()))
    }

    async fn refresh_connection(&self, id: &str) -> Result<()> {
        self.record("refresh_connection");
        self.evict(id);
        Self::fail_if(&self.fail_refresh, "refresh")
    }

    async fn set_automation(&self, id: &str, _enabled: bool) -> Result<()> {
        self.record("set_automation");
        self.evict(id);
        Self::fail_if(&self.fail_automation, "automation")
    }

    async fn delete_connection(&self, _id: &str) -> Result<()> {
        self.record("delete_connection");
        Self::fail_if(&self.fail_delete, "delete")
    }
}

#[async_trait]
impl PlatformCatalog for MockBackend {
    async fn list_platforms(&self, status: Option<PlatformStatus>) -> Result<Vec<Platform>> {
        self.record("list_platforms");
        Ok(self
            .platforms
            .lock()
            .unwrap()
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }

    async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>> {
        self.record("find_platform_by_name");
        Ok(self.platforms.lock().unwrap().iter().find(|p| p.matches_name(name)).cloned())
    }
}

#[async_trait]
impl OAuthBackend for MockBackend {
    async fn initiate(&self, request: InitiateConnectionRequest) -> Result<OAuthInitiation> {
        self.record("initiate");
        let platform = request.platform_id.clone();
        self.initiate_requests.lock().unwrap().push(request);
        Ok(OAuthInitiation {
            authorization_url: format!("https://auth.example.test/authorize?platform={platform}"),
            state: "state-123".to_string(),
            platform,
        })
    }

    async fn status(&self, _state: &str, _platform: &str) -> Result<OAuthStatus> {
        self.record("status");
        let step = self.statuses.lock().unwrap().pop_front();
        match step {
            None => Ok(OAuthStatus::pending()),
            Some(StatusStep::Status(status)) => Ok(status),
            Some(StatusStep::NetworkError) => {
                Err(CreatorLinkError::Network("connection reset by peer".into()))
            }
            Some(StatusStep::UserClosesWindow(flag)) => {
                flag.store(true, Ordering::SeqCst);
                Ok(OAuthStatus::pending())
            }
        }
    }
}

/// Confirmation answering with a fixed choice and recording prompts.
pub struct FixedConfirmation {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl FixedConfirmation {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self { answer, prompts: Mutex::new(Vec::new()) })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmation for FixedConfirmation {
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}
