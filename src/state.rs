use crate::store::CourseStore;

#[derive(Clone)]
pub struct AppState {
    pub courses: CourseStore,
}
