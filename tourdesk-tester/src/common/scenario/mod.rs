use anyhow::Result;
use chrono::NaiveDate;
use tourdesk_core::{BookingSession, EmbeddedData, RecordedCheckouts, StorefrontEngine};

pub mod booking;
pub mod catalog;
pub mod media;
pub mod smoke;

pub type Engine = StorefrontEngine<EmbeddedData, RecordedCheckouts>;

/// Per-iteration inputs handed to every expectation.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx {
    pub today: NaiveDate,
    pub iteration: usize,
    pub verbose: bool,
}

impl ScenarioCtx {
    pub fn engine(&self) -> Engine {
        StorefrontEngine::new(EmbeddedData, RecordedCheckouts::new())
    }

    pub fn session(&self) -> Result<BookingSession> {
        Ok(self.engine().create_session(self.today)?)
    }
}

pub type Expectation = fn(&ScenarioCtx) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub expectation: Expectation,
}

impl TestScenario {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str, expectation: Expectation) -> Self {
        Self {
            name,
            description,
            expectation,
        }
    }
}

pub fn all_scenarios() -> Vec<TestScenario> {
    let mut scenarios = vec![smoke::smoke_scenario()];
    scenarios.extend(catalog::catalog_scenarios());
    scenarios.extend(booking::booking_scenarios());
    scenarios.extend(media::media_scenarios());
    scenarios
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = name.to_lowercase();
    all_scenarios()
        .into_iter()
        .find(|scenario| scenario.name == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .into_iter()
        .map(|scenario| (scenario.name, scenario.description))
        .collect()
}
