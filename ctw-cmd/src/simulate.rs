//! Intervention simulation.

use ctw_data::simulation::{
    co_benefits, cost_breakdown, intervention_breakdown, projection, recommended_traffic_measures,
    InterventionInputs, SimulationRun, RUN_DISPLAY_DELAY,
};
use log::info;

pub async fn run_simulate(trees: i64, traffic: i64, scrubbers: i64, paced: bool, json: bool) -> anyhow::Result<()> {
    let inputs = InterventionInputs::new(trees, traffic, scrubbers);
    if (inputs.tree_count as i64, inputs.traffic_reduction_pct as i64, inputs.scrubber_count as i64)
        != (trees, traffic, scrubbers)
    {
        info!(
            "inputs adjusted to slider bounds: {} trees, {}% traffic, {} scrubbers",
            inputs.tree_count, inputs.traffic_reduction_pct, inputs.scrubber_count
        );
    }

    let mut run = SimulationRun::new();
    let ticket = run.start(inputs)?;
    if paced {
        println!("Running simulation...");
        tokio::time::sleep(RUN_DISPLAY_DELAY).await;
    }
    let result = run.finish(ticket)?;

    if json {
        let payload = serde_json::json!({
            "inputs": inputs,
            "result": result,
            "breakdown": intervention_breakdown(&inputs),
            "projection": projection(&result),
            "costs": cost_breakdown(&inputs, &result),
            "coBenefits": co_benefits(&result),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Interventions: {} trees, {}% traffic reduction, {} scrubbers",
        inputs.tree_count, inputs.traffic_reduction_pct, inputs.scrubber_count
    );
    println!("CO2 reduction:  {}%", result.impact_pct);
    println!("Total cost:     Rs {:.1} L", result.cost_lakh);
    println!("Timeline:       {} months", result.timeline_months);
    println!("Impact score:   {:.1}/10", result.roi);
    println!();
    for entry in intervention_breakdown(&inputs) {
        println!("  {:<8} {:>3}%", entry.name, entry.impact);
    }
    let benefits = co_benefits(&result);
    println!();
    println!(
        "AQI -{} points, heat -{:.1} C, {} jobs",
        benefits.aqi_reduction, benefits.heat_reduction, benefits.jobs_created
    );
    for measure in recommended_traffic_measures(inputs.traffic_reduction_pct) {
        println!("  > {}", measure);
    }
    println!();
    for point in projection(&result) {
        println!(
            "  {:<8} current {:>6.0}  projected {:>7.1}  target {:>4.0}",
            point.month, point.current, point.projected, point.target
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctw_data::simulation::SimulationError;

    #[tokio::test]
    async fn zero_inputs_are_rejected() {
        let err = run_simulate(0, 0, 0, false, true).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<SimulationError>(),
            Some(&SimulationError::NoImpact)
        );
    }

    #[tokio::test]
    async fn default_scenario_runs() {
        run_simulate(100, 20, 5, false, false).await.unwrap();
    }
}
