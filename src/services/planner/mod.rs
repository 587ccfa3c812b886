//! Planner session state.
//!
//! Owns the store, the virtual time window, the gesture controller, and
//! the resource selection/search state, and wires navigation to the load
//! boundary. The rendering layer reads layout snapshots from here and
//! feeds pointer events to the controller.

use anyhow::Result;
use chrono::NaiveDate;

use crate::config::PlannerConfig;
use crate::grid::layout::{self, ResourceLane};
use crate::grid::window::{NavigateDirection, TimeWindow};
use crate::interaction::controller::GestureController;
use crate::interaction::drop::DropTargetRegistry;
use crate::models::resource::Resource;
use crate::models::view::{TimeRange, ViewType};
use crate::services::source::AppointmentSource;
use crate::services::store::{AppointmentStore, LoadOutcome};

pub struct Planner {
    config: PlannerConfig,
    view: ViewType,
    window: TimeWindow,
    store: AppointmentStore,
    controller: GestureController,
    drop_targets: DropTargetRegistry,
    /// Resource rows currently shown; defaults to every loaded resource.
    selected_resources: Vec<String>,
    search_term: String,
}

impl Planner {
    /// Create a planner anchored on the given day.
    pub fn new(anchor: NaiveDate, config: PlannerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid planner configuration: {}", e))?;
        let window = TimeWindow::new(anchor, &config);
        let store = AppointmentStore::new(config.clone());

        Ok(Self {
            config,
            view: ViewType::Day,
            window,
            store,
            controller: GestureController::new(),
            drop_targets: DropTargetRegistry::new(),
            selected_resources: Vec::new(),
            search_term: String::new(),
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    pub fn set_view(&mut self, view: ViewType) {
        self.view = view;
    }

    pub fn current_date(&self) -> NaiveDate {
        self.window.anchor()
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn store(&self) -> &AppointmentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AppointmentStore {
        &mut self.store
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GestureController {
        &mut self.controller
    }

    pub fn drop_targets(&self) -> &DropTargetRegistry {
        &self.drop_targets
    }

    pub fn drop_targets_mut(&mut self) -> &mut DropTargetRegistry {
        &mut self.drop_targets
    }

    /// Fetch resources and the initial working set. All resources start
    /// selected, matching the reference behavior.
    pub async fn initialize(&mut self, source: &dyn AppointmentSource) -> Result<LoadOutcome> {
        self.store.load_resources(source).await?;
        self.selected_resources = self
            .store
            .resources()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        self.refresh(source).await
    }

    /// Reload the working set for the current window.
    pub async fn refresh(&mut self, source: &dyn AppointmentSource) -> Result<LoadOutcome> {
        let range = self.window.loaded_range();
        self.store.load(source, range).await
    }

    /// Move the window anchor and return the range the caller should
    /// refresh for.
    pub fn navigate(&mut self, direction: NavigateDirection) -> TimeRange {
        self.window.navigate(direction, self.view);
        self.window.loaded_range()
    }

    /// Toggle a resource row's visibility.
    pub fn toggle_resource(&mut self, resource_id: &str) {
        if let Some(position) = self
            .selected_resources
            .iter()
            .position(|id| id == resource_id)
        {
            self.selected_resources.remove(position);
        } else {
            self.selected_resources.push(resource_id.to_string());
        }
    }

    pub fn is_resource_selected(&self, resource_id: &str) -> bool {
        self.selected_resources.iter().any(|id| id == resource_id)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Resources matching the search box, for the resource list.
    pub fn filtered_resources(&self) -> Vec<&Resource> {
        self.store
            .resources()
            .into_iter()
            .filter(|r| r.matches_search(&self.search_term))
            .collect()
    }

    /// Selected resources in presentation order, for the grid rows.
    pub fn visible_resources(&self) -> Vec<&Resource> {
        self.store
            .resources()
            .into_iter()
            .filter(|r| self.is_resource_selected(&r.id))
            .collect()
    }

    /// Lay out the visible lanes from the last-settled store state. While
    /// a load is pending this is the stale working set; callers dim it
    /// via [`AppointmentStore::is_loading`].
    pub fn layout(&self) -> Vec<ResourceLane> {
        let visible = self.window.visible_range();
        let appointments = self.store.query(&visible);
        let resources = self.visible_resources();
        layout::layout_grid(&resources, &appointments, &visible, &self.config)
    }
}
