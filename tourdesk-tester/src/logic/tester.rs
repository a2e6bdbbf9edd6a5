use chrono::NaiveDate;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::{ScenarioCtx, TestScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        today: NaiveDate,
        iterations: usize,
    ) -> ScenarioResult {
        if self.verbose {
            println!(
                "🧪 Testing scenario: {} (today: {today})",
                scenario.name.bright_white()
            );
        }
        log::info!("running scenario {} for {iterations} iterations", scenario.name);

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for iteration in 0..iterations {
            let ctx = ScenarioCtx {
                today,
                iteration,
                verbose: self.verbose,
            };
            let start_time = Instant::now();
            match (scenario.expectation)(&ctx) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?})",
                            iteration + 1,
                            iterations
                        );
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {} (today {today}): {err:#}", iteration + 1);
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            iteration + 1,
                            iterations,
                            format!("{err:#}").red()
                        );
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn passes(_ctx: &ScenarioCtx) -> Result<()> {
        Ok(())
    }

    fn fails_on_odd(ctx: &ScenarioCtx) -> Result<()> {
        anyhow::ensure!(ctx.iteration % 2 == 0, "odd iteration {}", ctx.iteration);
        Ok(())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn counts_successes_and_failures() {
        let tester = LogicTester::new(false);
        let ok = tester.run_scenario(&TestScenario::new("ok", "", passes), today(), 3);
        assert!(ok.passed);
        assert_eq!(ok.successful_iterations, 3);

        let flaky = tester.run_scenario(&TestScenario::new("flaky", "", fails_on_odd), today(), 4);
        assert!(!flaky.passed);
        assert_eq!(flaky.successful_iterations, 2);
        assert_eq!(flaky.failures.len(), 2);
        assert!(flaky.failures[0].contains("odd iteration 1"));
    }

    #[test]
    fn result_serializes_duration_as_micros() {
        let result = ScenarioResult {
            scenario_name: "smoke".to_string(),
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(1500),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 1500);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.average_duration, Duration::from_micros(1500));
    }
}
