use crate::data::filter::{apply_filters, Filters};
use crate::data::model::{AnnualRecord, Session, SHARE_BLOCS, WORLD_ENTITY};

/// When no country is selected, the scatter chart samples the first
/// this-many distinct entities of the filtered view.
pub const SCATTER_SAMPLE: usize = 10;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Charts,
    Groups,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Charts, Tab::Groups, Tab::Data];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Charts => "📊 Charts",
            Tab::Groups => "🌐 Developed vs Developing",
            Tab::Data => "📋 Data",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views – cached index vectors into the session tables
// ---------------------------------------------------------------------------

/// Index views into the session tables, one per chart family. Rebuilt
/// from (Session, Filters) after every widget change; always subsets of
/// their source table.
#[derive(Debug, Clone, Default)]
pub struct Views {
    /// Annual rows passing entity + year + range (data tab).
    pub annual: Vec<usize>,
    /// `annual` restricted to the scatter entity sample.
    pub scatter: Vec<usize>,
    /// Annual rows passing the year range only (Groups tab sources;
    /// never affected by the entity/year selectors).
    pub range_only: Vec<usize>,
    /// Monthly rows for the resolved entity, passing year + range.
    pub monthly: Vec<usize>,
    /// Gas rows for the resolved entity, passing the range.
    pub gas: Vec<usize>,
    /// Share rows for the bloc aggregates.
    pub share: Vec<usize>,
    /// Entity the monthly and gas charts are showing ("All" resolves to
    /// the world aggregate).
    pub resolved_entity: String,
}

impl Views {
    /// Derive all views for the current filters. A full recompute per
    /// interaction; nothing incremental.
    pub fn build(session: &Session, filters: &Filters) -> Self {
        let entity = filters.entity.as_deref();
        let year = filters.year;
        let range = Some(filters.year_range);

        let annual = apply_filters(&session.annual, entity, year, range);
        let scatter = match entity {
            Some(_) => annual.clone(),
            None => sample_entities(&session.annual, &annual, SCATTER_SAMPLE),
        };
        let range_only = apply_filters(&session.annual, None, None, range);

        let resolved_entity = entity.unwrap_or(WORLD_ENTITY).to_string();
        let monthly = apply_filters(&session.monthly, Some(resolved_entity.as_str()), year, range);
        let gas = apply_filters(&session.gas, Some(resolved_entity.as_str()), None, range);

        let share = session
            .shares
            .iter()
            .enumerate()
            .filter(|(_, r)| SHARE_BLOCS.contains(&r.entity.as_str()))
            .map(|(i, _)| i)
            .collect();

        Views {
            annual,
            scatter,
            range_only,
            monthly,
            gas,
            share,
            resolved_entity,
        }
    }
}

/// Restrict a view to rows of its first `limit` distinct entities, in
/// first-seen order.
fn sample_entities(annual: &[AnnualRecord], view: &[usize], limit: usize) -> Vec<usize> {
    let mut seen: Vec<&str> = Vec::new();
    let mut sampled = Vec::new();
    for &i in view {
        let entity = annual[i].entity.as_str();
        if seen.iter().any(|s| *s == entity) {
            sampled.push(i);
        } else if seen.len() < limit {
            seen.push(entity);
            sampled.push(i);
        }
    }
    sampled
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded session (None until a data directory loads successfully).
    pub session: Option<Session>,

    /// Current filter selections.
    pub filters: Filters,

    /// Cached index views for the current filters.
    pub views: Views,

    /// Active tab of the central panel.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a data-loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: None,
            filters: Filters::unfiltered((0, 0)),
            views: Views::default(),
            tab: Tab::Charts,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded session and reset filters to pass-through.
    pub fn set_session(&mut self, session: Session) {
        self.filters = Filters::unfiltered(session.year_span);
        self.session = Some(session);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Recompute the cached views after a filter change.
    pub fn refilter(&mut self) {
        self.views = match &self.session {
            Some(session) => Views::build(session, &self.filters),
            None => Views::default(),
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupingConfig;
    use crate::data::model::{GroupLabel, MonthlyRecord, ShareRecord};

    fn record(entity: &str, year: i32, value: f64) -> AnnualRecord {
        AnnualRecord {
            entity: entity.to_string(),
            iso2: String::new(),
            iso3: String::new(),
            indicator: String::new(),
            unit: String::new(),
            year,
            value,
            group: GroupLabel::Developing,
        }
    }

    fn session() -> Session {
        let mut annual = Vec::new();
        for entity in ["Kenya", "Japan", "World"] {
            for year in [1990, 1991, 1992] {
                annual.push(record(entity, year, 0.1));
            }
        }
        let monthly = vec![
            MonthlyRecord::new("World".into(), 1990, 1, 0.2).unwrap(),
            MonthlyRecord::new("Kenya".into(), 1990, 1, 0.1).unwrap(),
        ];
        let shares = vec![
            ShareRecord {
                entity: SHARE_BLOCS[0].to_string(),
                year: 1990,
                share: 50.0,
            },
            ShareRecord {
                entity: "World".to_string(),
                year: 1990,
                share: 100.0,
            },
        ];
        Session::from_tables(annual, monthly, Vec::new(), shares, GroupingConfig::default())
    }

    #[test]
    fn all_selection_resolves_to_world() {
        let s = session();
        let views = Views::build(&s, &Filters::unfiltered(s.year_span));
        assert_eq!(views.resolved_entity, WORLD_ENTITY);
        assert_eq!(views.monthly, vec![0]);
    }

    #[test]
    fn range_only_view_ignores_entity_selection() {
        let s = session();
        let mut filters = Filters::unfiltered(s.year_span);
        filters.entity = Some("Kenya".to_string());
        filters.year_range = (1990, 1991);
        let views = Views::build(&s, &filters);

        assert_eq!(views.annual.len(), 2);
        // Three entities × two years, regardless of the Kenya selection.
        assert_eq!(views.range_only.len(), 6);
    }

    #[test]
    fn share_view_keeps_only_bloc_entities() {
        let s = session();
        let views = Views::build(&s, &Filters::unfiltered(s.year_span));
        assert_eq!(views.share, vec![0]);
    }

    #[test]
    fn scatter_samples_first_distinct_entities() {
        let mut annual = Vec::new();
        for i in 0..(SCATTER_SAMPLE + 3) {
            let entity = format!("Country {i}");
            annual.push(record(&entity, 1990, 0.1));
            annual.push(record(&entity, 1991, 0.2));
        }
        let s = Session::from_tables(
            annual,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            GroupingConfig::default(),
        );
        let views = Views::build(&s, &Filters::unfiltered(s.year_span));

        assert_eq!(views.scatter.len(), SCATTER_SAMPLE * 2);
        assert!(views.scatter.iter().all(|i| views.annual.contains(i)));
    }
}
