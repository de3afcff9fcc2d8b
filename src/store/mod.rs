use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::db::CourseCache;
use crate::error::AppError;
use crate::models::{Course, CourseDraft, MAX_COURSE_ID};
use crate::remote::CourseRemote;
use crate::services::loader::dedupe_by_id;
use crate::services::{LoadSource, resolve_initial};

pub const COPY_SUFFIX: &str = " (Cópia)";

/// Authoritative, observable course catalog.
///
/// The mapping lives in a `watch` channel: every subscriber sees the current
/// snapshot on subscribe and each replacement after it. Mutations run as a
/// single closure on the sender, then mirror best-effort to the remote and
/// the cache. Cloning is cheap and yields a handle to the same catalog.
#[derive(Clone)]
pub struct CourseStore {
    inner: Arc<Inner>,
}

struct Inner {
    courses: watch::Sender<Vec<Course>>,
    // Only touched while the watch sender's write lock is held.
    next_id: AtomicU64,
    cache: CourseCache,
    remote: Option<Arc<dyn CourseRemote>>,
    persist_lock: Mutex<()>,
    source: LoadSource,
}

impl CourseStore {
    pub async fn open(cache: CourseCache, remote: Option<Arc<dyn CourseRemote>>) -> Self {
        let outcome = resolve_initial(&cache, remote.as_deref()).await;
        let next_id = next_id_after(&outcome.courses);
        let (courses, _) = watch::channel(outcome.courses);

        Self {
            inner: Arc::new(Inner {
                courses,
                next_id: AtomicU64::new(next_id),
                cache,
                remote,
                persist_lock: Mutex::new(()),
                source: outcome.source,
            }),
        }
    }

    pub fn load_source(&self) -> LoadSource {
        self.inner.source
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Course>> {
        self.inner.courses.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Course> {
        self.inner.courses.borrow().clone()
    }

    pub fn find(&self, id: u64) -> Option<Course> {
        self.inner.courses.borrow().iter().find(|c| c.id == id).cloned()
    }

    pub fn list(&self) -> WatchStream<Vec<Course>> {
        WatchStream::new(self.subscribe())
    }

    pub fn get_by_id(&self, id: u64) -> impl Stream<Item = Option<Course>> + Send + use<> {
        self.list()
            .map(move |courses| courses.into_iter().find(|c| c.id == id))
    }

    pub fn categories(&self) -> impl Stream<Item = BTreeSet<String>> + Send + use<> {
        self.list().map(|courses| categories_of(&courses))
    }

    /// Other courses in the same category, in catalog order.
    pub fn related(&self, id: u64, limit: usize) -> Vec<Course> {
        let courses = self.inner.courses.borrow();
        let Some(course) = courses.iter().find(|c| c.id == id) else {
            return Vec::new();
        };
        courses
            .iter()
            .filter(|c| c.category == course.category && c.id != id)
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn create(&self, draft: CourseDraft) -> Result<Course, AppError> {
        let now = Utc::now();
        let mut created = None;
        self.inner.courses.send_if_modified(|courses| {
            let Some(id) = self.issue_id(courses) else {
                return false;
            };
            let course = Course::from_draft(id, draft, now);
            courses.push(course.clone());
            created = Some(course);
            true
        });
        let Some(course) = created else {
            warn!("Course ids exhausted, create rejected");
            return Err(AppError::BadRequest("no course ids left".to_string()));
        };
        info!("Created course {} ({})", course.id, course.name);

        self.persist().await;
        if let Some(remote) = &self.inner.remote {
            match remote.create_course(&course).await {
                Ok(echo) if echo.id != course.id => {
                    debug!("Remote echoed id {} for course {}, keeping local id", echo.id, course.id);
                }
                Ok(_) => {}
                Err(e) => warn!("Remote create failed for course {}, kept locally: {}", course.id, e),
            }
        }

        Ok(course)
    }

    pub async fn update(&self, id: u64, draft: CourseDraft) -> Result<Course, AppError> {
        let mut updated = None;
        self.inner.courses.send_if_modified(|courses| {
            let Some(existing) = courses.iter_mut().find(|c| c.id == id) else {
                return false;
            };
            let updated_at = Utc::now().max(existing.updated_at);
            *existing = Course {
                id,
                name: draft.name,
                category: draft.category,
                description: draft.description,
                workload: draft.workload,
                created_at: existing.created_at,
                updated_at,
            };
            updated = Some(existing.clone());
            true
        });
        let Some(course) = updated else {
            debug!("Update of unknown course {} rejected", id);
            return Err(AppError::NotFound);
        };
        info!("Updated course {} ({})", course.id, course.name);

        self.persist().await;
        if let Some(remote) = &self.inner.remote {
            if let Err(e) = remote.update_course(&course).await {
                warn!("Remote update failed for course {}, kept locally: {}", course.id, e);
            }
        }

        Ok(course)
    }

    /// Removes a course. Unknown ids are a silent no-op.
    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let removed = self.inner.courses.send_if_modified(|courses| {
            let before = courses.len();
            courses.retain(|c| c.id != id);
            courses.len() != before
        });

        if removed {
            info!("Deleted course {}", id);
            self.persist().await;
        } else {
            debug!("Delete of unknown course {} ignored", id);
        }

        if let Some(remote) = &self.inner.remote {
            if let Err(e) = remote.delete_course(id).await {
                warn!("Remote delete failed for course {}: {}", id, e);
            }
        }

        Ok(())
    }

    pub async fn duplicate(&self, id: u64) -> Result<Course, AppError> {
        let source = self.find(id).ok_or(AppError::NotFound)?;
        let mut draft = source.to_draft();
        draft.name.push_str(COPY_SUFFIX);
        self.create(draft).await
    }

    pub fn export(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Replaces the whole catalog with a previously exported list.
    pub async fn import(&self, json: &str) -> Result<usize, AppError> {
        let courses: Vec<Course> = serde_json::from_str(json)
            .map_err(|e| AppError::BadRequest(format!("invalid course list: {}", e)))?;
        if let Some(course) = courses.iter().find(|c| c.id >= MAX_COURSE_ID) {
            return Err(AppError::BadRequest(format!(
                "course id {} is out of range",
                course.id
            )));
        }
        let courses = dedupe_by_id(courses);
        let count = courses.len();

        self.inner.courses.send_modify(|current| {
            self.inner
                .next_id
                .fetch_max(next_id_after(&courses), Ordering::SeqCst);
            *current = courses;
        });
        info!("Imported {} courses", count);

        self.persist().await;
        Ok(count)
    }

    /// `None` once the id space up to [`MAX_COURSE_ID`] is used up.
    fn issue_id(&self, held: &[Course]) -> Option<u64> {
        let id = self
            .inner
            .next_id
            .load(Ordering::SeqCst)
            .max(next_id_after(held));
        if id > MAX_COURSE_ID {
            return None;
        }
        self.inner.next_id.store(id + 1, Ordering::SeqCst);
        Some(id)
    }

    async fn persist(&self) {
        let _guard = self.inner.persist_lock.lock().await;
        let snapshot = self.snapshot();
        self.inner.cache.write(&snapshot).await;
    }
}

pub fn categories_of(courses: &[Course]) -> BTreeSet<String> {
    courses.iter().map(|c| c.category.clone()).collect()
}

fn next_id_after(courses: &[Course]) -> u64 {
    courses
        .iter()
        .map(|c| c.id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
