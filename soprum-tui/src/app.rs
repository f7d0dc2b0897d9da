use std::sync::Arc;

use soprum_core::{
    report::{ComparisonReport, CostReport},
    service::SoprumService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    PropertyList,
    ComparisonView,
}

pub(crate) struct App {
    pub service: Arc<SoprumService>,
    pub username: String,

    pub screen: Screen,
    pub costs: Vec<CostReport>,
    pub list_index: usize,

    pub comparison: Option<ComparisonReport>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<SoprumService>, username: String) -> Self {
        Self {
            service,
            username,
            screen: Screen::PropertyList,
            costs: Vec::new(),
            list_index: 0,
            comparison: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn selected_cost(&self) -> Option<&CostReport> {
        self.costs.get(self.list_index)
    }

    pub(crate) fn set_costs(&mut self, costs: Vec<CostReport>) {
        self.costs = costs;
        self.list_index = self.list_index.min(self.costs.len().saturating_sub(1));
    }

    pub(crate) fn open_comparison(&mut self, report: ComparisonReport) {
        self.comparison = Some(report);
        self.screen = Screen::ComparisonView;
    }

    pub(crate) fn back_to_list(&mut self) {
        self.screen = Screen::PropertyList;
        self.comparison = None;
    }
}
