mod decades;
mod global;
mod regions;
mod temperature;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::derived::Derived;
use crate::error::{PipelineError, Result};
use crate::events::EventAnnotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    GlobalTrend,
    EventsAndImpacts,
    Co2Temperature,
    EmissionsByRegion,
    EmissionsPerGdp,
    FocusTerritory,
}

impl Page {
    pub fn slug(&self) -> &'static str {
        match self {
            Page::GlobalTrend => "global-trend",
            Page::EventsAndImpacts => "events-and-impacts",
            Page::Co2Temperature => "co2-temperature",
            Page::EmissionsByRegion => "emissions-by-region",
            Page::EmissionsPerGdp => "emissions-per-gdp",
            Page::FocusTerritory => "focus-territory",
        }
    }

    pub fn all() -> [Page; 6] {
        [
            Page::GlobalTrend,
            Page::EventsAndImpacts,
            Page::Co2Temperature,
            Page::EmissionsByRegion,
            Page::EmissionsPerGdp,
            Page::FocusTerritory,
        ]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim().to_ascii_lowercase();
        Page::all()
            .into_iter()
            .find(|page| page.slug() == wanted)
            .ok_or_else(|| PipelineError::Processing(format!("unknown page '{value}'")))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageDescriptor {
    pub page: Page,
    pub title: &'static str,
    pub question: &'static str,
}

static PAGES: Lazy<Vec<PageDescriptor>> = Lazy::new(|| {
    vec![
        PageDescriptor {
            page: Page::GlobalTrend,
            title: "Global Trend",
            question: "How has the global trend in CO₂ emissions evolved?",
        },
        PageDescriptor {
            page: Page::EventsAndImpacts,
            title: "Events and Impacts",
            question: "What periods show significant changes and what events influenced them?",
        },
        PageDescriptor {
            page: Page::Co2Temperature,
            title: "CO₂-Temperature Relationship",
            question: "Is there a relationship between CO₂ emissions and temperature increase?",
        },
        PageDescriptor {
            page: Page::EmissionsByRegion,
            title: "Emissions by Region",
            question: "Which continents are the biggest emitters?",
        },
        PageDescriptor {
            page: Page::EmissionsPerGdp,
            title: "Emissions per GDP",
            question: "Which sectors are responsible for most CO₂ emissions?",
        },
        PageDescriptor {
            page: Page::FocusTerritory,
            title: "Focus Territory",
            question: "And what about the focus territory?",
        },
    ]
});

pub fn all_page_descriptors() -> &'static [PageDescriptor] {
    PAGES.as_slice()
}

pub fn page_descriptor(page: Page) -> &'static PageDescriptor {
    PAGES
        .iter()
        .find(|descriptor| descriptor.page == page)
        .unwrap_or(&PAGES[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Area,
    Bar,
    Sunburst,
    Scatter,
    ScatterGeo,
}

/// One chart on a page: its kind, title and the table it plots.
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub chart: ChartKind,
    pub data: Derived,
    pub annotations: Vec<EventAnnotation>,
}

impl Panel {
    pub fn new(title: impl Into<String>, chart: ChartKind, data: Derived) -> Self {
        Self {
            title: title.into(),
            chart,
            data,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<EventAnnotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

/// The parameters of one render cycle. Nothing about a previous request is remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Page,
    pub year: i64,
}

#[derive(Debug, Clone)]
pub struct PageOutput {
    pub page: Page,
    pub year: i64,
    pub panels: Vec<Panel>,
}

impl PageOutput {
    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.title == title)
    }
}

pub fn render_page(
    data: &DataFrame,
    request: &PageRequest,
    config: &DashboardConfig,
) -> Result<PageOutput> {
    let panels = match request.page {
        Page::GlobalTrend => global::global_trend(data, request.year, config)?,
        Page::EventsAndImpacts => decades::events_and_impacts(data, config)?,
        Page::Co2Temperature => temperature::co2_temperature(data, config)?,
        Page::EmissionsByRegion => regions::emissions_by_region(data, config)?,
        Page::EmissionsPerGdp => regions::emissions_per_gdp(data, config)?,
        Page::FocusTerritory => global::focus_territory(data, config)?,
    };

    for panel in panels.iter().filter(|panel| panel.data.is_empty()) {
        warn!(
            page = %request.page,
            panel = %panel.title,
            reason = panel.data.empty_reason().unwrap_or_default(),
            "Panel has no data"
        );
    }
    info!(
        page = %request.page,
        year = request.year,
        panels = panels.len(),
        "Rendered page"
    );

    Ok(PageOutput {
        page: request.page,
        year: request.year,
        panels,
    })
}
