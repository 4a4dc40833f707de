//! What-if emission reduction model.
//!
//! Three interventions feed a linear model: tree planting, a traffic
//! reduction target and CO₂ scrubber units. Every figure here is a pure
//! function of `InterventionInputs`.

use ctw_utils::numbers::{round1, round_half_up};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Pacing applied by callers between starting a run and showing results.
/// The calculation itself is synchronous.
pub const RUN_DISPLAY_DELAY: Duration = Duration::from_millis(3000);

/// Inclusive slider range and step for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl InputBounds {
    /// Clamp into range, then snap to the nearest step.
    pub fn snap(&self, value: i64) -> u32 {
        let clamped = value.clamp(self.min as i64, self.max as i64);
        let step = self.step.max(1) as i64;
        let offset = clamped - self.min as i64;
        let snapped = self.min as i64 + ((offset + step / 2) / step) * step;
        snapped.min(self.max as i64) as u32
    }
}

pub const TREE_BOUNDS: InputBounds = InputBounds {
    min: 0,
    max: 500,
    step: 10,
};
pub const TRAFFIC_BOUNDS: InputBounds = InputBounds {
    min: 0,
    max: 50,
    step: 5,
};
pub const SCRUBBER_BOUNDS: InputBounds = InputBounds {
    min: 0,
    max: 20,
    step: 1,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterventionInputs {
    pub tree_count: u32,
    /// Percent
    pub traffic_reduction_pct: u32,
    pub scrubber_count: u32,
}

impl Default for InterventionInputs {
    /// The starting slider positions.
    fn default() -> Self {
        InterventionInputs {
            tree_count: 100,
            traffic_reduction_pct: 20,
            scrubber_count: 5,
        }
    }
}

impl InterventionInputs {
    /// Build inputs from raw slider values, clamped and snapped to each
    /// slider's range and step.
    pub fn new(tree_count: i64, traffic_reduction_pct: i64, scrubber_count: i64) -> Self {
        InterventionInputs {
            tree_count: TREE_BOUNDS.snap(tree_count),
            traffic_reduction_pct: TRAFFIC_BOUNDS.snap(traffic_reduction_pct),
            scrubber_count: SCRUBBER_BOUNDS.snap(scrubber_count),
        }
    }

    fn tree_impact(&self) -> f64 {
        self.tree_count as f64 * 0.05
    }

    fn traffic_impact(&self) -> f64 {
        self.traffic_reduction_pct as f64 * 0.8
    }

    fn scrubber_impact(&self) -> f64 {
        self.scrubber_count as f64 * 2.0
    }

    /// Interventions with a non-zero setting.
    pub fn active(&self) -> Vec<Intervention> {
        let mut active = Vec::new();
        if self.tree_count > 0 {
            active.push(Intervention::Trees);
        }
        if self.traffic_reduction_pct > 0 {
            active.push(Intervention::Traffic);
        }
        if self.scrubber_count > 0 {
            active.push(Intervention::Tech);
        }
        active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intervention {
    Trees,
    Traffic,
    Tech,
}

impl Intervention {
    pub fn label(&self) -> &'static str {
        match self {
            Intervention::Trees => "Trees",
            Intervention::Traffic => "Traffic",
            Intervention::Tech => "Tech",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Intervention::Trees => "#10b981",
            Intervention::Traffic => "#3b82f6",
            Intervention::Tech => "#0891b2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionResult {
    /// Estimated CO₂ reduction, whole percent
    pub impact_pct: i64,
    /// Total cost in lakh rupees
    pub cost_lakh: f64,
    pub timeline_months: i64,
    /// Impact per lakh scaled to a 0-10 score, one decimal
    pub roi: f64,
}

/// Evaluate the model.
pub fn compute_impact(inputs: &InterventionInputs) -> InterventionResult {
    let impact_pct = round_half_up(
        inputs.tree_impact() + inputs.traffic_impact() + inputs.scrubber_impact(),
    ) as i64;
    let cost_lakh = (inputs.tree_count as f64 * 500.0
        + inputs.traffic_reduction_pct as f64 * 10_000.0
        + inputs.scrubber_count as f64 * 2_500_000.0)
        / 100_000.0;
    let timeline_months = (inputs.tree_count as f64 / 10.0)
        .max(inputs.traffic_reduction_pct as f64 / 5.0)
        .max(inputs.scrubber_count as f64 * 2.0)
        .ceil() as i64;
    let roi = if cost_lakh > 0.0 {
        round1((impact_pct as f64 / cost_lakh) * 10.0)
    } else {
        0.0
    };
    InterventionResult {
        impact_pct,
        cost_lakh,
        timeline_months,
        roi,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub impact: i64,
    pub fill: String,
}

/// Rounded impact of each intervention on its own.
pub fn intervention_breakdown(inputs: &InterventionInputs) -> Vec<BreakdownEntry> {
    [
        (Intervention::Trees, inputs.tree_impact()),
        (Intervention::Traffic, inputs.traffic_impact()),
        (Intervention::Tech, inputs.scrubber_impact()),
    ]
    .iter()
    .map(|(kind, impact)| BreakdownEntry {
        name: kind.label().to_string(),
        impact: round_half_up(*impact) as i64,
        fill: kind.color().to_string(),
    })
    .collect()
}

pub const PROJECTION_TARGET: f64 = 900.0;
const PROJECTION_BASELINE: [f64; 6] = [1200.0, 1180.0, 1150.0, 1120.0, 1100.0, 1080.0];
const PROJECTION_RAMP: [f64; 6] = [0.2, 0.4, 0.6, 0.8, 1.0, 1.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: String,
    pub current: f64,
    pub projected: f64,
    pub target: f64,
}

/// Six-month CO₂ projection with the impact phasing in over five months.
pub fn projection(result: &InterventionResult) -> Vec<ProjectionPoint> {
    PROJECTION_BASELINE
        .iter()
        .zip(PROJECTION_RAMP.iter())
        .enumerate()
        .map(|(i, (current, ramp))| ProjectionPoint {
            month: format!("Month {}", i + 1),
            current: *current,
            projected: current - result.impact_pct as f64 * 12.0 * ramp,
            target: PROJECTION_TARGET,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub category: String,
    /// Lakh rupees
    pub cost: f64,
    pub fill: String,
}

pub fn cost_breakdown(inputs: &InterventionInputs, result: &InterventionResult) -> Vec<CostEntry> {
    [
        ("Green Infra", inputs.tree_count as f64 * 0.5, "#10b981"),
        ("Traffic Sys", inputs.traffic_reduction_pct as f64 / 10.0, "#3b82f6"),
        ("Technology", inputs.scrubber_count as f64 * 25.0, "#0891b2"),
        ("Implementation", result.cost_lakh * 0.15, "#f59e0b"),
    ]
    .iter()
    .map(|&(category, cost, fill)| CostEntry {
        category: category.to_string(),
        cost,
        fill: fill.to_string(),
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoBenefits {
    pub aqi_reduction: i64,
    /// Degrees Celsius
    pub heat_reduction: f64,
    pub jobs_created: i64,
}

pub fn co_benefits(result: &InterventionResult) -> CoBenefits {
    let impact = result.impact_pct as f64;
    CoBenefits {
        aqi_reduction: round_half_up(impact * 1.8) as i64,
        heat_reduction: impact * 0.15,
        jobs_created: round_half_up(impact * 45.0) as i64,
    }
}

/// Traffic measures unlocked at 10, 20, 30 and 40 percent.
pub fn recommended_traffic_measures(traffic_reduction_pct: u32) -> Vec<&'static str> {
    [
        (10, "Promote public transport usage"),
        (20, "Implement odd-even vehicle policy"),
        (30, "Establish car-free zones in CBD"),
        (40, "Congestion pricing implementation"),
    ]
    .iter()
    .filter(|(threshold, _)| traffic_reduction_pct >= *threshold)
    .map(|(_, measure)| *measure)
    .collect()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimulationError {
    #[error("no intervention is configured; the estimated impact is zero")]
    NoImpact,
    #[error("a simulation run is already in progress")]
    AlreadyRunning,
    #[error("no simulation run is in progress")]
    NotRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Complete,
}

/// Permission to complete one started run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTicket {
    generation: u64,
    result: InterventionResult,
}

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn result(&self) -> InterventionResult {
        self.result
    }
}

/// The run control: `Idle -> Running -> Complete`, and `reset` back to idle.
///
/// Each start bumps the generation; `finish` only accepts the ticket of the
/// run in progress, so a timer left over from a reset run cannot complete a
/// newer one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRun {
    generation: u64,
    state: RunState,
    inputs: Option<InterventionInputs>,
    result: Option<InterventionResult>,
    active: Vec<Intervention>,
}

impl SimulationRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn active_interventions(&self) -> &[Intervention] {
        &self.active
    }

    /// Inputs and result of the last completed run.
    pub fn completed(&self) -> Option<(InterventionInputs, InterventionResult)> {
        match (self.state, self.inputs, self.result) {
            (RunState::Complete, Some(inputs), Some(result)) => Some((inputs, result)),
            _ => None,
        }
    }

    /// Start a run. Fails when nothing would change or a run is underway.
    pub fn start(&mut self, inputs: InterventionInputs) -> Result<RunTicket, SimulationError> {
        if self.state == RunState::Running {
            return Err(SimulationError::AlreadyRunning);
        }
        let result = compute_impact(&inputs);
        if result.impact_pct <= 0 {
            return Err(SimulationError::NoImpact);
        }
        log::debug!(
            "simulation started: {:?} -> {}% impact",
            inputs,
            result.impact_pct
        );
        self.generation += 1;
        self.state = RunState::Running;
        self.inputs = Some(inputs);
        self.result = Some(result);
        self.active = inputs.active();
        Ok(RunTicket {
            generation: self.generation,
            result,
        })
    }

    /// Mark the run `ticket` belongs to complete once the display delay
    /// elapsed. A ticket from a reset or earlier run is rejected.
    pub fn finish(&mut self, ticket: RunTicket) -> Result<InterventionResult, SimulationError> {
        match (self.state, self.result) {
            (RunState::Running, Some(result)) if ticket.generation == self.generation => {
                self.state = RunState::Complete;
                Ok(result)
            }
            _ => {
                log::debug!(
                    "ignoring finish for run {} (current {})",
                    ticket.generation,
                    self.generation
                );
                Err(SimulationError::NotRunning)
            }
        }
    }

    /// Back to idle. The generation survives so outstanding tickets stay stale.
    pub fn reset(&mut self) {
        *self = SimulationRun {
            generation: self.generation,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(tree_count: u32, traffic_reduction_pct: u32, scrubber_count: u32) -> InterventionInputs {
        InterventionInputs {
            tree_count,
            traffic_reduction_pct,
            scrubber_count,
        }
    }

    #[test]
    fn test_zero_inputs() {
        let result = compute_impact(&inputs(0, 0, 0));
        assert_eq!(result.impact_pct, 0);
        assert_eq!(result.cost_lakh, 0.0);
        assert_eq!(result.timeline_months, 0);
        assert_eq!(result.roi, 0.0);
    }

    #[test]
    fn test_default_scenario() {
        let result = compute_impact(&inputs(100, 20, 5));
        assert_eq!(result.impact_pct, 31);
        assert_eq!(result.cost_lakh, 127.5);
        assert_eq!(result.timeline_months, 10);
        assert_eq!(result.roi, 2.4);
        assert_eq!(compute_impact(&InterventionInputs::default()), result);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let i = inputs(370, 35, 13);
        assert_eq!(compute_impact(&i), compute_impact(&i));
    }

    #[test]
    fn test_timeline_rounds_up() {
        assert_eq!(compute_impact(&inputs(10, 0, 0)).timeline_months, 1);
        assert_eq!(compute_impact(&inputs(0, 5, 0)).timeline_months, 1);
        assert_eq!(compute_impact(&inputs(0, 0, 3)).timeline_months, 6);
    }

    #[test]
    fn test_impact_rounds_half_up() {
        // 10 trees -> 0.5
        assert_eq!(compute_impact(&inputs(10, 0, 0)).impact_pct, 1);
        assert_eq!(compute_impact(&inputs(0, 5, 0)).impact_pct, 4);
    }

    #[test]
    fn test_inputs_are_clamped_and_snapped() {
        let i = InterventionInputs::new(-20, 99, 7);
        assert_eq!(i, inputs(0, 50, 7));
        let i = InterventionInputs::new(104, 12, 25);
        assert_eq!(i, inputs(100, 10, 20));
        let i = InterventionInputs::new(495, 48, 0);
        assert_eq!(i, inputs(500, 50, 0));
    }

    #[test]
    fn test_breakdown_and_active_interventions() {
        let i = inputs(100, 20, 0);
        let breakdown = intervention_breakdown(&i);
        let impacts: Vec<i64> = breakdown.iter().map(|b| b.impact).collect();
        assert_eq!(impacts, vec![5, 16, 0]);
        assert_eq!(i.active(), vec![Intervention::Trees, Intervention::Traffic]);
    }

    #[test]
    fn test_projection() {
        let result = compute_impact(&inputs(100, 20, 5));
        let points = projection(&result);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].month, "Month 1");
        assert!((points[0].projected - (1200.0 - 31.0 * 12.0 * 0.2)).abs() < 1e-9);
        assert_eq!(points[4].projected, 1100.0 - 372.0);
        assert_eq!(points[5].projected, 1080.0 - 372.0);
        assert!(points.iter().all(|p| p.target == 900.0));
    }

    #[test]
    fn test_cost_breakdown_and_co_benefits() {
        let i = inputs(100, 20, 5);
        let result = compute_impact(&i);
        let costs: Vec<f64> = cost_breakdown(&i, &result).iter().map(|c| c.cost).collect();
        assert_eq!(costs[0], 50.0);
        assert_eq!(costs[1], 2.0);
        assert_eq!(costs[2], 125.0);
        assert!((costs[3] - 19.125).abs() < 1e-9);

        let benefits = co_benefits(&result);
        assert_eq!(benefits.aqi_reduction, 56);
        assert!((benefits.heat_reduction - 4.65).abs() < 1e-9);
        assert_eq!(benefits.jobs_created, 1395);
    }

    #[test]
    fn test_recommended_measures() {
        assert!(recommended_traffic_measures(5).is_empty());
        assert_eq!(recommended_traffic_measures(20).len(), 2);
        assert_eq!(recommended_traffic_measures(50).len(), 4);
    }

    #[test]
    fn test_run_state_machine() {
        let mut run = SimulationRun::new();
        assert_eq!(run.state(), RunState::Idle);

        let ticket = run.start(inputs(100, 20, 5)).unwrap();
        let result = ticket.result();
        assert_eq!(result.impact_pct, 31);
        assert_eq!(run.state(), RunState::Running);
        assert_eq!(run.active_interventions().len(), 3);
        assert_eq!(run.start(inputs(10, 0, 0)), Err(SimulationError::AlreadyRunning));
        assert!(run.completed().is_none());

        assert_eq!(run.finish(ticket), Ok(result));
        assert_eq!(run.state(), RunState::Complete);
        assert_eq!(run.completed(), Some((inputs(100, 20, 5), result)));
        assert_eq!(run.finish(ticket), Err(SimulationError::NotRunning));

        run.reset();
        assert_eq!(run.state(), RunState::Idle);
        assert!(run.active_interventions().is_empty());
        assert_eq!(run.finish(ticket), Err(SimulationError::NotRunning));
    }

    #[test]
    fn test_reset_run_cannot_finish_newer_run() {
        let mut run = SimulationRun::new();
        let first = run.start(inputs(100, 20, 5)).unwrap();
        run.reset();
        let second = run.start(inputs(500, 0, 0)).unwrap();
        assert!(second.generation() > first.generation());

        assert_eq!(run.finish(first), Err(SimulationError::NotRunning));
        assert_eq!(run.state(), RunState::Running);
        assert!(run.completed().is_none());

        let result = run.finish(second).unwrap();
        assert_eq!(result.impact_pct, 25);
        assert_eq!(run.completed(), Some((inputs(500, 0, 0), result)));
    }

    #[test]
    fn test_run_requires_impact() {
        let mut run = SimulationRun::new();
        assert_eq!(run.start(inputs(0, 0, 0)), Err(SimulationError::NoImpact));
        assert_eq!(run.state(), RunState::Idle);
    }
}
