//! Page controller for the global (index page) search.
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──finish_load(Ok)──▶ Ready ─┬─ ShowingCategories
//!                         │                                ├─ ShowingSearchResults
//!                         └──finish_load(Err)──▶ Error     └─ ShowingNoResults
//! ```
//!
//! Every transition goes through [`SearchController::render`], which calls
//! [`Surface::clear_transient`] before anything else is inserted, so only one
//! of categories / results / loading / no-results / error is ever visible.

use contracts::domain::a001_course::CourseRecord;
use contracts::shared::LoadError;

use super::{filter_records, group_by_category, CategoryGroup, Query};

/// Состояние загрузки data.json (single-flight)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    InFlight,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    ShowingCategories,
    ShowingSearchResults { matches: usize },
    ShowingNoResults,
    Error,
}

/// Where the controller draws. Implemented over the DOM grid and by test fakes.
pub trait Surface {
    /// Remove loading, error and no-results messages and any previous
    /// search results.
    fn clear_transient(&mut self);
    fn set_categories_visible(&mut self, visible: bool);
    fn show_loading(&mut self);
    fn show_results(&mut self, groups: &[CategoryGroup<'_>]);
    fn show_no_results(&mut self);
    fn show_error(&mut self, message: &str);
}

pub struct SearchController<S: Surface> {
    surface: S,
    load: LoadState,
    records: Vec<CourseRecord>,
    query: Query,
    view: ViewState,
    last_error: Option<LoadError>,
}

impl<S: Surface> SearchController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            load: LoadState::NotStarted,
            records: Vec::new(),
            query: Query::default(),
            view: ViewState::Idle,
            last_error: None,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Enter `Loading`. Returns `false` (and changes nothing) while a load is
    /// in flight or after it succeeded; from `Failed` this is the explicit retry.
    pub fn begin_load(&mut self) -> bool {
        match self.load {
            LoadState::InFlight | LoadState::Loaded => {
                log::debug!("course load suppressed: {:?}", self.load);
                false
            }
            LoadState::NotStarted | LoadState::Failed => {
                self.load = LoadState::InFlight;
                self.last_error = None;
                self.render(ViewState::Loading);
                true
            }
        }
    }

    pub fn finish_load(&mut self, result: Result<Vec<CourseRecord>, LoadError>) {
        if self.load != LoadState::InFlight {
            log::warn!("load result ignored in state {:?}", self.load);
            return;
        }
        match result {
            Ok(records) => {
                log::info!("loaded {} courses", records.len());
                self.records = records;
                self.load = LoadState::Loaded;
                self.refresh();
            }
            Err(err) => {
                log::error!("Error loading courses: {}", err);
                self.load = LoadState::Failed;
                self.last_error = Some(err);
                self.render(ViewState::Error);
            }
        }
    }

    /// Record the query and, once records are loaded, re-derive the view.
    pub fn on_query(&mut self, raw: &str) {
        self.query = Query::new(raw);
        if self.load == LoadState::Loaded {
            self.refresh();
        }
    }

    pub fn clear_query(&mut self) {
        self.on_query("");
    }

    fn refresh(&mut self) {
        let next = if self.query.is_empty() {
            ViewState::ShowingCategories
        } else {
            match filter_records(&self.records, &self.query).len() {
                0 => ViewState::ShowingNoResults,
                matches => ViewState::ShowingSearchResults { matches },
            }
        };
        self.render(next);
    }

    fn render(&mut self, next: ViewState) {
        self.surface.clear_transient();
        self.surface
            .set_categories_visible(next == ViewState::ShowingCategories);

        match &next {
            ViewState::Idle | ViewState::ShowingCategories => {}
            ViewState::Loading => self.surface.show_loading(),
            ViewState::ShowingSearchResults { .. } => {
                let matches = filter_records(&self.records, &self.query);
                let groups = group_by_category(&matches);
                self.surface.show_results(&groups);
            }
            ViewState::ShowingNoResults => self.surface.show_no_results(),
            ViewState::Error => {
                let message = self
                    .last_error
                    .as_ref()
                    .map(LoadError::user_message)
                    .unwrap_or_default();
                self.surface.show_error(message);
            }
        }
        self.view = next;
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::sample;
    use super::*;

    /// Models the grid: which views currently have content, plus an op log.
    #[derive(Default)]
    struct RecordingSurface {
        categories: bool,
        loading: bool,
        no_results: bool,
        error: Option<String>,
        results: Vec<String>,
        ops: Vec<&'static str>,
    }

    impl RecordingSurface {
        fn visible_views(&self) -> usize {
            [
                self.categories,
                self.loading,
                self.no_results,
                self.error.is_some(),
                !self.results.is_empty(),
            ]
            .iter()
            .filter(|v| **v)
            .count()
        }
    }

    impl Surface for RecordingSurface {
        fn clear_transient(&mut self) {
            self.loading = false;
            self.no_results = false;
            self.error = None;
            self.results.clear();
            self.ops.push("clear");
        }

        fn set_categories_visible(&mut self, visible: bool) {
            self.categories = visible;
            self.ops.push(if visible { "categories" } else { "hide-categories" });
        }

        fn show_loading(&mut self) {
            self.loading = true;
            self.ops.push("loading");
        }

        fn show_results(&mut self, groups: &[CategoryGroup<'_>]) {
            self.results = groups
                .iter()
                .flat_map(|g| g.records.iter().map(|r| r.code.clone()))
                .collect();
            self.ops.push("results");
        }

        fn show_no_results(&mut self) {
            self.no_results = true;
            self.ops.push("no-results");
        }

        fn show_error(&mut self, message: &str) {
            self.error = Some(message.to_string());
            self.ops.push("error");
        }
    }

    fn loaded() -> SearchController<RecordingSurface> {
        let mut c = SearchController::new(RecordingSurface::default());
        assert!(c.begin_load());
        c.finish_load(Ok(sample()));
        c
    }

    #[test]
    fn test_single_flight_load() {
        let mut c = SearchController::new(RecordingSurface::default());
        assert_eq!(c.load_state(), LoadState::NotStarted);
        assert!(c.begin_load());
        assert!(!c.begin_load());
        assert_eq!(c.view(), &ViewState::Loading);
        assert_eq!(c.surface().visible_views(), 1);
        c.finish_load(Ok(sample()));
        assert!(!c.begin_load());
        assert_eq!(c.load_state(), LoadState::Loaded);
    }

    #[test]
    fn test_load_without_query_shows_categories() {
        let c = loaded();
        assert_eq!(c.view(), &ViewState::ShowingCategories);
        assert!(c.surface().categories);
        assert_eq!(c.surface().visible_views(), 1);
    }

    #[test]
    fn test_query_transitions() {
        let mut c = loaded();

        c.on_query("circ");
        assert_eq!(c.view(), &ViewState::ShowingSearchResults { matches: 2 });
        assert_eq!(c.surface().results, vec!["LB101", "PH201"]);
        assert_eq!(c.surface().visible_views(), 1);

        c.on_query("zz");
        assert_eq!(c.view(), &ViewState::ShowingNoResults);
        assert_eq!(c.surface().visible_views(), 1);

        c.on_query("   ");
        assert_eq!(c.view(), &ViewState::ShowingCategories);
        assert_eq!(c.surface().visible_views(), 1);
    }

    #[test]
    fn test_clear_query_returns_to_categories() {
        let mut c = loaded();
        c.on_query("lab");
        c.clear_query();
        assert_eq!(c.view(), &ViewState::ShowingCategories);
        assert!(c.surface().results.is_empty());
    }

    #[test]
    fn test_every_transition_clears_first() {
        let mut c = loaded();
        for q in ["circ", "zz", "", "karimi", "karimi", ""] {
            c.on_query(q);
        }
        let ops = &c.surface().ops;
        // every render starts with "clear", followed by the categories toggle
        let renders: Vec<usize> = ops
            .iter()
            .enumerate()
            .filter(|(_, op)| **op == "clear")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(renders.len(), 8);
        for i in renders {
            assert!(matches!(ops[i + 1], "categories" | "hide-categories"));
        }
        assert_eq!(ops[0], "clear");
    }

    #[test]
    fn test_query_typed_while_loading_applies_after_load() {
        let mut c = SearchController::new(RecordingSurface::default());
        c.begin_load();
        c.on_query("karimi");
        assert_eq!(c.view(), &ViewState::Loading);
        c.finish_load(Ok(sample()));
        assert_eq!(c.view(), &ViewState::ShowingSearchResults { matches: 2 });
    }

    #[test]
    fn test_failure_shows_error_without_retry() {
        let mut c = SearchController::new(RecordingSurface::default());
        c.begin_load();
        c.finish_load(Err(LoadError::Network("404 Not Found".into())));
        assert_eq!(c.view(), &ViewState::Error);
        assert_eq!(c.load_state(), LoadState::Failed);
        assert_eq!(c.surface().visible_views(), 1);
        assert_eq!(c.surface().error.as_deref(), Some("امکان بارگیری دروس وجود ندارد"));

        c.on_query("circ");
        assert_eq!(c.view(), &ViewState::Error);

        // explicit retry
        assert!(c.begin_load());
        c.finish_load(Ok(sample()));
        assert_eq!(c.view(), &ViewState::ShowingSearchResults { matches: 2 });
    }

    #[test]
    fn test_parse_error_surfaces_like_network_error() {
        let mut c = SearchController::new(RecordingSurface::default());
        c.begin_load();
        c.finish_load(Err(LoadError::Parse("eof".into())));
        assert_eq!(c.surface().error.as_deref(), Some("امکان بارگیری دروس وجود ندارد"));
    }

    #[test]
    fn test_late_result_is_ignored() {
        let mut c = loaded();
        c.finish_load(Err(LoadError::Network("late".into())));
        assert_eq!(c.load_state(), LoadState::Loaded);
        assert_eq!(c.view(), &ViewState::ShowingCategories);
        assert_eq!(c.records().len(), 5);
    }
}
