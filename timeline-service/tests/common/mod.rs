//! In-memory fakes for the service-layer ports, shared across the
//! integration test suites.

// Not every suite touches every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use timeline_service::cache::TimelineCache;
use timeline_service::db::{FollowGraph, TweetStore, UserDirectory};
use timeline_service::error::{AppError, Result};
use timeline_service::events::{EventPublisher, TweetPostedEvent};
use timeline_service::models::Tweet;
use timeline_service::services::{FollowService, PostService, TimelineService};

pub const PAGE_SIZE: usize = 50;
pub const CACHE_TTL: u64 = 300;

pub struct MemoryUserDirectory {
    users: Mutex<HashSet<Uuid>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashSet::new()),
        }
    }

    pub fn add(&self, user_id: Uuid) {
        self.users.lock().unwrap().insert(user_id);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.users.lock().unwrap().contains(&user_id))
    }
}

pub struct MemoryFollowGraph {
    edges: Mutex<HashSet<(Uuid, Uuid)>>,
}

impl MemoryFollowGraph {
    pub fn new() -> Self {
        Self {
            edges: Mutex::new(HashSet::new()),
        }
    }

    pub fn add_edge(&self, follower_id: Uuid, followee_id: Uuid) {
        self.edges.lock().unwrap().insert((follower_id, followee_id));
    }
}

#[async_trait]
impl FollowGraph for MemoryFollowGraph {
    async fn followees_of(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .map(|(_, followee)| *followee)
            .collect())
    }

    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, followee)| *followee == user_id)
            .map(|(follower, _)| *follower)
            .collect())
    }

    async fn edge_exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .contains(&(follower_id, followee_id)))
    }

    async fn save_edge(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        self.edges.lock().unwrap().insert((follower_id, followee_id));
        Ok(())
    }

    async fn delete_edge(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        self.edges.lock().unwrap().remove(&(follower_id, followee_id));
        Ok(())
    }
}

/// Returns tweets in insertion order, deliberately unsorted, so the tests
/// prove the ranking happens in the service rather than the store.
pub struct MemoryTweetStore {
    tweets: Mutex<Vec<Tweet>>,
    fetch_calls: AtomicUsize,
}

impl MemoryTweetStore {
    pub fn new() -> Self {
        Self {
            tweets: Mutex::new(Vec::new()),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn all(&self) -> Vec<Tweet> {
        self.tweets.lock().unwrap().clone()
    }
}

#[async_trait]
impl TweetStore for MemoryTweetStore {
    async fn save(&self, tweet: &Tweet) -> Result<()> {
        self.tweets.lock().unwrap().push(tweet.clone());
        Ok(())
    }

    async fn fetch_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Tweet>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tweets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| author_ids.contains(&t.user_id))
            .cloned()
            .collect())
    }
}

pub struct MemoryTimelineCache {
    entries: Mutex<HashMap<Uuid, Vec<Tweet>>>,
    last_ttl: Mutex<Option<u64>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryTimelineCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            last_ttl: Mutex::new(None),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn entry(&self, viewer_id: Uuid) -> Option<Vec<Tweet>> {
        self.entries.lock().unwrap().get(&viewer_id).cloned()
    }

    pub fn seed(&self, viewer_id: Uuid, tweets: Vec<Tweet>) {
        self.entries.lock().unwrap().insert(viewer_id, tweets);
    }

    pub fn last_ttl(&self) -> Option<u64> {
        *self.last_ttl.lock().unwrap()
    }
}

#[async_trait]
impl TimelineCache for MemoryTimelineCache {
    async fn get(&self, viewer_id: Uuid) -> Result<Option<Vec<Tweet>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::CacheError("cache offline".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(&viewer_id).cloned())
    }

    async fn put(&self, viewer_id: Uuid, tweets: &[Tweet], ttl_seconds: u64) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::CacheError("cache offline".to_string()));
        }
        *self.last_ttl.lock().unwrap() = Some(ttl_seconds);
        self.entries
            .lock()
            .unwrap()
            .insert(viewer_id, tweets.to_vec());
        Ok(())
    }

    async fn invalidate(&self, viewer_id: Uuid) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::CacheError("cache offline".to_string()));
        }
        self.entries.lock().unwrap().remove(&viewer_id);
        Ok(())
    }
}

pub struct RecordingEventPublisher {
    events: Mutex<Vec<TweetPostedEvent>>,
    fail: AtomicBool,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<TweetPostedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: &TweetPostedEvent) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("kafka offline".to_string()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Fully wired service stack over the in-memory fakes.
pub struct Harness {
    pub users: Arc<MemoryUserDirectory>,
    pub follows: Arc<MemoryFollowGraph>,
    pub tweets: Arc<MemoryTweetStore>,
    pub cache: Arc<MemoryTimelineCache>,
    pub events: Arc<RecordingEventPublisher>,
    pub timeline_service: Arc<TimelineService>,
    pub post_service: Arc<PostService>,
    pub follow_service: Arc<FollowService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        let users = Arc::new(MemoryUserDirectory::new());
        let follows = Arc::new(MemoryFollowGraph::new());
        let tweets = Arc::new(MemoryTweetStore::new());
        let cache = Arc::new(MemoryTimelineCache::new());
        let events = Arc::new(RecordingEventPublisher::new());

        let timeline_service = Arc::new(TimelineService::new(
            users.clone(),
            follows.clone(),
            tweets.clone(),
            cache.clone(),
            page_size,
            CACHE_TTL,
        ));
        let post_service = Arc::new(PostService::new(
            users.clone(),
            follows.clone(),
            tweets.clone(),
            cache.clone(),
            events.clone(),
        ));
        let follow_service = Arc::new(FollowService::new(users.clone(), follows.clone()));

        Self {
            users,
            follows,
            tweets,
            cache,
            events,
            timeline_service,
            post_service,
            follow_service,
        }
    }

    /// Register a user and return its id.
    pub fn user(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.users.add(id);
        id
    }
}

/// Tweet with a deterministic timestamp, seconds after the epoch.
pub fn tweet_at(author_id: Uuid, secs: i64, content: &str) -> Tweet {
    Tweet {
        id: Uuid::new_v4(),
        user_id: author_id,
        content: content.to_string(),
        created_at: Utc.timestamp_opt(secs, 0).unwrap(),
    }
}
