use crate::record::{Application, Status};
use crate::statics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => statics::EN_FILTER_ALL,
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn accepts(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// The displayed subset of the record list.
/// Derived on demand from the current inputs; never cached or re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub search: String,
    pub status: StatusFilter,
}

impl Filter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status != StatusFilter::All
    }

    pub fn matches(&self, app: &Application) -> bool {
        let query_lower = self.search.trim().to_lowercase();
        Self::matches_lowered(app, &query_lower, self.status)
    }

    pub fn apply<'a>(&self, records: &'a [Application]) -> Vec<&'a Application> {
        let query_lower = self.search.trim().to_lowercase();
        records
            .iter()
            .filter(|app| Self::matches_lowered(app, &query_lower, self.status))
            .collect()
    }

    fn matches_lowered(app: &Application, query_lower: &str, status: StatusFilter) -> bool {
        status.accepts(app.status)
            && (query_lower.is_empty() || app.company_name.to_lowercase().contains(query_lower))
    }
}
