use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::db::CourseCache;
use crate::models::{Course, MAX_COURSE_ID};
use crate::remote::CourseRemote;
use crate::services::seed::sample_courses;

/// Which tier supplied the store's initial content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Cache,
    Remote,
    Sample,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub courses: Vec<Course>,
    pub source: LoadSource,
}

/// Resolves the initial catalog: cache, then remote, then the sample set.
///
/// A populated cache shadows the remote on every later start; the remote is
/// only consulted while the cache is empty. Loaded lists are deduplicated by id
/// and stripped of out-of-range ids before the store or the cache sees them.
pub async fn resolve_initial(cache: &CourseCache, remote: Option<&dyn CourseRemote>) -> LoadOutcome {
    let cached = accept_loaded(cache.read().await);
    if !cached.is_empty() {
        info!("Loaded {} courses from cache '{}'", cached.len(), cache.key());
        return LoadOutcome {
            courses: cached,
            source: LoadSource::Cache,
        };
    }

    if let Some(remote) = remote {
        match remote.fetch_courses().await {
            Ok(courses) => {
                let courses = accept_loaded(courses);
                info!("Loaded {} courses from remote", courses.len());
                cache.write(&courses).await;
                return LoadOutcome {
                    courses,
                    source: LoadSource::Remote,
                };
            }
            Err(e) => {
                warn!("Remote load failed, falling back to sample courses: {}", e);
            }
        }
    }

    let courses = sample_courses();
    info!("Loaded {} sample courses", courses.len());
    cache.write(&courses).await;
    LoadOutcome {
        courses,
        source: LoadSource::Sample,
    }
}

fn accept_loaded(courses: Vec<Course>) -> Vec<Course> {
    let total = courses.len();
    let courses: Vec<Course> = courses
        .into_iter()
        .filter(|c| c.id < MAX_COURSE_ID)
        .collect();
    if courses.len() != total {
        warn!("Dropped {} courses with out-of-range ids", total - courses.len());
    }
    dedupe_by_id(courses)
}

/// Keeps the first course for each id.
pub fn dedupe_by_id(courses: Vec<Course>) -> Vec<Course> {
    let total = courses.len();
    let mut seen = HashSet::new();
    let kept: Vec<Course> = courses.into_iter().filter(|c| seen.insert(c.id)).collect();
    if kept.len() != total {
        warn!("Dropped {} courses with duplicate ids", total - kept.len());
    }
    kept
}
