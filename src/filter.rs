use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::models::Course;

/// Search term and category, both optional (empty means "any").
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CourseFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
}

impl CourseFilter {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_empty()
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.matches_search(course) && self.matches_category(course)
    }

    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        courses.iter().filter(|c| self.matches(c)).cloned().collect()
    }

    pub fn by_search(&self, courses: &[Course]) -> Vec<Course> {
        courses.iter().filter(|c| self.matches_search(c)).cloned().collect()
    }

    pub fn by_category(&self, courses: &[Course]) -> Vec<Course> {
        courses.iter().filter(|c| self.matches_category(c)).cloned().collect()
    }

    fn matches_search(&self, course: &Course) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        course.name.to_lowercase().contains(&term)
            || course.description.to_lowercase().contains(&term)
    }

    fn matches_category(&self, course: &Course) -> bool {
        self.category.is_empty() || course.category == self.category
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub count: usize,
    pub total_workload: u64,
}

impl CourseSummary {
    pub fn of(courses: &[Course]) -> Self {
        Self {
            count: courses.len(),
            total_workload: courses.iter().map(|c| u64::from(c.workload)).sum(),
        }
    }
}

/// Live filtered projection of a course list.
///
/// A background task recomputes the output whenever the source list or the
/// criteria change. The task stops when the view is dropped.
pub struct FilteredView {
    criteria: watch::Sender<CourseFilter>,
    output: watch::Receiver<Vec<Course>>,
    task: JoinHandle<()>,
}

impl FilteredView {
    pub fn spawn(mut courses: watch::Receiver<Vec<Course>>) -> Self {
        let (criteria, mut criteria_rx) = watch::channel(CourseFilter::default());
        let initial = courses.borrow_and_update().clone();
        let (output_tx, output) = watch::channel(initial);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = courses.changed() => if changed.is_err() { break },
                    changed = criteria_rx.changed() => if changed.is_err() { break },
                }

                let filtered = {
                    let filter = criteria_rx.borrow_and_update().clone();
                    filter.apply(&courses.borrow_and_update())
                };
                if output_tx.send(filtered).is_err() {
                    break;
                }
            }
        });

        Self {
            criteria,
            output,
            task,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Course>> {
        self.output.clone()
    }

    pub fn current(&self) -> Vec<Course> {
        self.output.borrow().clone()
    }

    pub fn criteria(&self) -> CourseFilter {
        self.criteria.borrow().clone()
    }

    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        self.criteria.send_modify(|c| c.search = term);
    }

    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.criteria.send_modify(|c| c.category = category);
    }

    pub fn clear(&self) {
        self.criteria.send_replace(CourseFilter::default());
    }
}

impl Drop for FilteredView {
    fn drop(&mut self) {
        self.task.abort();
    }
}
