// Entity stores: one generic list cache over a service contract,
// instantiated per entity. The cache mirrors the backend collection and is
// patched from single-record responses after successful writes, never
// refetched wholesale on mutation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Post, Project, User};
use crate::services::validation::{PostInput, ProjectInput, UserInput};
use crate::services::{PostService, ProjectService, ServiceResponse, UserService};

/// Where a freshly created record lands in the cache. The original web
/// client prepended posts and projects but appended users; the difference
/// is kept as an explicit per-entity policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Prepend,
    Append,
}

/// Cacheable entity: dual-field identity, a natural key for exact lookup,
/// optional role, timestamps and the 1-3 fields free-text search looks at.
pub trait Entity: Clone {
    fn matches_id(&self, candidate: &str) -> bool;
    /// Human-facing key: username for users, name for projects, title for
    /// posts.
    fn lookup_key(&self) -> &str;
    fn role(&self) -> Option<&str> {
        None
    }
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn search_haystack(&self) -> Vec<&str>;
}

impl Entity for Project {
    fn matches_id(&self, candidate: &str) -> bool {
        Project::matches_id(self, candidate)
    }
    fn lookup_key(&self) -> &str {
        &self.name
    }
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

impl Entity for User {
    fn matches_id(&self, candidate: &str) -> bool {
        User::matches_id(self, candidate)
    }
    fn lookup_key(&self) -> &str {
        &self.username
    }
    fn role(&self) -> Option<&str> {
        Some(&self.role)
    }
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.username, &self.role]
    }
}

impl Entity for Post {
    fn matches_id(&self, candidate: &str) -> bool {
        Post::matches_id(self, candidate)
    }
    fn lookup_key(&self) -> &str {
        &self.title
    }
    fn role(&self) -> Option<&str> {
        Some(&self.role)
    }
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.content, &self.role]
    }
}

/// Service contract a store synchronizes against.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    type Item: Entity + Send + Sync;
    type Input: Send + Sync;

    fn insert_position(&self) -> InsertPosition;

    async fn fetch_all(&self) -> ServiceResponse<Vec<Self::Item>>;
    async fn create_item(&self, input: &Self::Input) -> ServiceResponse<Self::Item>;
    async fn update_item(&self, id: &str, input: &Self::Input) -> ServiceResponse<Self::Item>;
    async fn delete_item(&self, id: &str) -> ServiceResponse<()>;
}

#[async_trait]
impl StoreBackend for ProjectService {
    type Item = Project;
    type Input = ProjectInput;

    fn insert_position(&self) -> InsertPosition {
        InsertPosition::Prepend
    }

    async fn fetch_all(&self) -> ServiceResponse<Vec<Project>> {
        self.list().await
    }
    async fn create_item(&self, input: &ProjectInput) -> ServiceResponse<Project> {
        self.create(input).await
    }
    async fn update_item(&self, id: &str, input: &ProjectInput) -> ServiceResponse<Project> {
        self.update(id, input).await
    }
    async fn delete_item(&self, id: &str) -> ServiceResponse<()> {
        self.delete(id).await
    }
}

#[async_trait]
impl StoreBackend for UserService {
    type Item = User;
    type Input = UserInput;

    fn insert_position(&self) -> InsertPosition {
        InsertPosition::Append
    }

    async fn fetch_all(&self) -> ServiceResponse<Vec<User>> {
        self.list().await
    }
    async fn create_item(&self, input: &UserInput) -> ServiceResponse<User> {
        self.create(input).await
    }
    async fn update_item(&self, id: &str, input: &UserInput) -> ServiceResponse<User> {
        self.update(id, input).await
    }
    async fn delete_item(&self, id: &str) -> ServiceResponse<()> {
        self.delete(id).await
    }
}

#[async_trait]
impl StoreBackend for PostService {
    type Item = Post;
    type Input = PostInput;

    fn insert_position(&self) -> InsertPosition {
        InsertPosition::Prepend
    }

    async fn fetch_all(&self) -> ServiceResponse<Vec<Post>> {
        self.list().await
    }
    async fn create_item(&self, input: &PostInput) -> ServiceResponse<Post> {
        self.create(input).await
    }
    async fn update_item(&self, id: &str, input: &PostInput) -> ServiceResponse<Post> {
        self.update(id, input).await
    }
    async fn delete_item(&self, id: &str) -> ServiceResponse<()> {
        self.delete(id).await
    }
}

/// Per-role counts for dashboard summaries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStatistics {
    pub total: usize,
    pub admins: usize,
    pub designers: usize,
    pub developers: usize,
    pub testers: usize,
}

/// List cache with loading/error flags plus derived views.
///
/// Mutations are applied only after server confirmation. If two writes to
/// the same record are in flight, the last response to resolve wins.
pub struct EntityStore<B: StoreBackend> {
    backend: B,
    items: Vec<B::Item>,
    loading: bool,
    error: Option<String>,
}

pub type ProjectsStore = EntityStore<ProjectService>;
pub type UsersStore = EntityStore<UserService>;
pub type PostsStore = EntityStore<PostService>;

impl<B: StoreBackend> EntityStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, items: Vec::new(), loading: false, error: None }
    }

    pub fn items(&self) -> &[B::Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the cache wholesale from the backend. On failure the cache
    /// is left untouched and the message is recorded; loading always ends
    /// false.
    pub async fn fetch(&mut self) {
        self.loading = true;
        self.error = None;

        let result = self.backend.fetch_all().await;
        if result.success {
            self.items = result.data.unwrap_or_default();
        } else {
            self.error = Some(result.message);
        }

        self.loading = false;
    }

    pub async fn create(&mut self, input: &B::Input) -> ServiceResponse<B::Item> {
        self.loading = true;
        self.error = None;

        let result = self.backend.create_item(input).await;
        if result.success {
            if let Some(item) = result.data.clone() {
                match self.backend.insert_position() {
                    InsertPosition::Prepend => self.items.insert(0, item),
                    InsertPosition::Append => self.items.push(item),
                }
            }
        } else {
            self.error = Some(result.message.clone());
        }

        self.loading = false;
        result
    }

    /// Replace the matching cached record in place; a miss is silently
    /// ignored.
    pub async fn update(&mut self, id: &str, input: &B::Input) -> ServiceResponse<B::Item> {
        self.loading = true;
        self.error = None;

        let result = self.backend.update_item(id, input).await;
        if result.success {
            if let Some(item) = result.data.clone() {
                if let Some(index) = self.items.iter().position(|i| i.matches_id(id)) {
                    self.items[index] = item;
                }
            }
        } else {
            self.error = Some(result.message.clone());
        }

        self.loading = false;
        result
    }

    /// Drop the matching cached record; a miss is silently a no-op.
    pub async fn delete(&mut self, id: &str) -> ServiceResponse<()> {
        self.loading = true;
        self.error = None;

        let result = self.backend.delete_item(id).await;
        if result.success {
            self.items.retain(|i| !i.matches_id(id));
        } else {
            self.error = Some(result.message.clone());
        }

        self.loading = false;
        result
    }

    pub fn find_by_id(&self, id: &str) -> Option<&B::Item> {
        self.items.iter().find(|i| i.matches_id(id))
    }

    /// Exact-match lookup on the natural key (username, project name,
    /// post title).
    pub fn find_by_key(&self, key: &str) -> Option<&B::Item> {
        self.items.iter().find(|i| i.lookup_key() == key)
    }

    pub fn by_role(&self, role: &str) -> Vec<&B::Item> {
        self.items.iter().filter(|i| i.role() == Some(role)).collect()
    }

    /// Role-filtered view where admin sees everything.
    pub fn visible_to(&self, role: &str) -> Vec<&B::Item> {
        if role == "admin" {
            self.items.iter().collect()
        } else {
            self.by_role(role)
        }
    }

    /// Ten most recently created records, newest first.
    pub fn recently_created(&self) -> Vec<&B::Item> {
        self.top_by(|i| i.created_at())
    }

    /// Ten most recently updated records, newest first.
    pub fn recently_updated(&self) -> Vec<&B::Item> {
        self.top_by(|i| i.updated_at())
    }

    fn top_by(&self, key: impl Fn(&B::Item) -> Option<DateTime<Utc>>) -> Vec<&B::Item> {
        let mut sorted: Vec<&B::Item> = self.items.iter().collect();
        sorted.sort_by(|a, b| key(b).cmp(&key(a)));
        sorted.truncate(10);
        sorted
    }

    /// Case-insensitive substring search, OR across the entity's haystack
    /// fields. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&B::Item> {
        if term.is_empty() {
            return self.items.iter().collect();
        }
        let term = term.to_lowercase();
        self.items
            .iter()
            .filter(|i| {
                i.search_haystack()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn statistics(&self) -> StoreStatistics {
        StoreStatistics {
            total: self.items.len(),
            admins: self.by_role("admin").len(),
            designers: self.by_role("designer").len(),
            developers: self.by_role("developer").len(),
            testers: self.by_role("tester").len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Scripted backend: pops one pre-seeded response per call.
    struct ScriptedBackend {
        position: InsertPosition,
        fetches: Mutex<VecDeque<ServiceResponse<Vec<Post>>>>,
        writes: Mutex<VecDeque<ServiceResponse<Post>>>,
        deletes: Mutex<VecDeque<ServiceResponse<()>>>,
    }

    impl ScriptedBackend {
        fn new(position: InsertPosition) -> Self {
            Self {
                position,
                fetches: Mutex::new(VecDeque::new()),
                writes: Mutex::new(VecDeque::new()),
                deletes: Mutex::new(VecDeque::new()),
            }
        }
    }

    #[async_trait]
    impl StoreBackend for ScriptedBackend {
        type Item = Post;
        type Input = PostInput;

        fn insert_position(&self) -> InsertPosition {
            self.position
        }

        async fn fetch_all(&self) -> ServiceResponse<Vec<Post>> {
            self.fetches.lock().unwrap().pop_front().expect("scripted fetch")
        }
        async fn create_item(&self, _input: &PostInput) -> ServiceResponse<Post> {
            self.writes.lock().unwrap().pop_front().expect("scripted create")
        }
        async fn update_item(&self, _id: &str, _input: &PostInput) -> ServiceResponse<Post> {
            self.writes.lock().unwrap().pop_front().expect("scripted update")
        }
        async fn delete_item(&self, _id: &str) -> ServiceResponse<()> {
            self.deletes.lock().unwrap().pop_front().expect("scripted delete")
        }
    }

    fn post(id: &str, title: &str, role: &str) -> Post {
        Post {
            id: Some(id.to_string()),
            title: title.to_string(),
            content: "Tillgänglighet är viktigt".to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    fn input() -> PostInput {
        PostInput {
            title: "Ny punkt".to_string(),
            content: "Tillräckligt långt innehåll".to_string(),
            role: "designer".to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_failure_keeps_cache_and_records_error() {
        let backend = ScriptedBackend::new(InsertPosition::Prepend);
        backend.fetches.lock().unwrap().push_back(ServiceResponse::ok(
            vec![post("p1", "Första", "designer")],
            "Hämtade 1 inlägg",
        ));
        backend
            .fetches
            .lock()
            .unwrap()
            .push_back(ServiceResponse::fail("Kan inte ansluta till servern"));

        let mut store = EntityStore::new(backend);
        store.fetch().await;
        assert_eq!(store.len(), 1);
        assert!(store.error().is_none());

        store.fetch().await;
        assert_eq!(store.len(), 1, "cache survives a failed refetch");
        assert!(store.error().is_some());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn create_respects_insert_position() {
        for (position, expected_first) in
            [(InsertPosition::Prepend, "p2"), (InsertPosition::Append, "p1")]
        {
            let backend = ScriptedBackend::new(position);
            backend
                .fetches
                .lock()
                .unwrap()
                .push_back(ServiceResponse::ok(vec![post("p1", "Första", "designer")], ""));
            backend
                .writes
                .lock()
                .unwrap()
                .push_back(ServiceResponse::ok(post("p2", "Andra", "tester"), ""));

            let mut store = EntityStore::new(backend);
            store.fetch().await;
            store.create(&input()).await;

            assert_eq!(store.len(), 2);
            assert_eq!(store.items()[0].id.as_deref(), Some(expected_first));
        }
    }

    #[tokio::test]
    async fn update_miss_is_silently_ignored() {
        let backend = ScriptedBackend::new(InsertPosition::Prepend);
        backend
            .fetches
            .lock()
            .unwrap()
            .push_back(ServiceResponse::ok(vec![post("p1", "Första", "designer")], ""));
        backend
            .writes
            .lock()
            .unwrap()
            .push_back(ServiceResponse::ok(post("p9", "Okänd", "tester"), ""));

        let mut store = EntityStore::new(backend);
        store.fetch().await;
        let result = store.update("p9", &input()).await;

        assert!(result.success);
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].title, "Första");
    }

    #[tokio::test]
    async fn delete_removes_by_either_identity_field() {
        let backend = ScriptedBackend::new(InsertPosition::Prepend);
        let mut legacy = post("x", "Gammal", "tester");
        legacy.id = None;
        legacy.alt_id = Some("m1".to_string());
        backend
            .fetches
            .lock()
            .unwrap()
            .push_back(ServiceResponse::ok(vec![legacy, post("p1", "Första", "designer")], ""));
        backend.deletes.lock().unwrap().push_back(ServiceResponse::ok((), ""));

        let mut store = EntityStore::new(backend);
        store.fetch().await;
        store.delete("m1").await;

        assert_eq!(store.len(), 1);
        assert!(store.find_by_id("m1").is_none());
    }

    #[test]
    fn search_is_case_insensitive_or_semantics() {
        let backend = ScriptedBackend::new(InsertPosition::Prepend);
        let mut store = EntityStore::new(backend);
        store.items = vec![
            post("p1", "Kontrast i formulär", "designer"),
            post("p2", "Tangentbordsnavigering", "developer"),
        ];

        assert_eq!(store.search("KONTRAST").len(), 1);
        // role field matches too
        assert_eq!(store.search("developer").len(), 1);
        assert_eq!(store.search("").len(), 2);
        assert_eq!(store.search("saknas").len(), 0);
    }

    #[test]
    fn find_by_key_requires_an_exact_match() {
        let backend = ScriptedBackend::new(InsertPosition::Prepend);
        let mut store = EntityStore::new(backend);
        store.items = vec![
            post("p1", "Kontrast", "designer"),
            post("p2", "Kontrast i formulär", "designer"),
        ];

        assert_eq!(
            store.find_by_key("Kontrast").and_then(|p| p.id.as_deref()),
            Some("p1")
        );
        assert!(store.find_by_key("kontrast").is_none());
        assert!(store.find_by_key("Kontrast i").is_none());
    }

    #[test]
    fn visible_to_admin_sees_everything() {
        let backend = ScriptedBackend::new(InsertPosition::Prepend);
        let mut store = EntityStore::new(backend);
        store.items = vec![
            post("p1", "A", "designer"),
            post("p2", "B", "developer"),
        ];

        assert_eq!(store.visible_to("admin").len(), 2);
        assert_eq!(store.visible_to("designer").len(), 1);
        assert_eq!(store.statistics().designers, 1);
    }
}
