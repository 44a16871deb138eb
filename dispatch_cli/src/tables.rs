use std::fmt::Display;

use comfy_table::{CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use dispatch_optimizer::solver::{candidate_pool::CandidatePool, search::RandomizedSearch};

use crate::solve::SolveReport;

fn add_pool_rows<S>(table: &mut Table, pool: &CandidatePool<S>)
where
    S: Display + Copy + PartialEq,
{
    for candidate in pool.candidates() {
        table.add_row(vec![
            pool.name().to_string(),
            candidate.strategy.to_string(),
            candidate.weight.to_string(),
            format!("{:.3}", pool.probability(candidate.strategy)),
        ]);
    }
}

/// Final weights of every strategy pool after a search.
pub fn pool_weights_table(search: &RandomizedSearch) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Pool", "Strategy", "Weight", "Probability"]);

    add_pool_rows(&mut table, search.best_factors());
    add_pool_rows(&mut table, search.vehicle_orders());
    add_pool_rows(&mut table, search.ride_orders());

    for index in 2..4 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

pub fn results_table(reports: &[SolveReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(vec![
        "Problem", "Score", "Distance", "Bonus", "Rides", "Duration",
    ]);

    for report in reports {
        table.add_row(vec![
            report.problem.clone(),
            report.score.total().to_string(),
            report.score.distance.to_string(),
            report.score.bonus.to_string(),
            format!("{}/{}", report.assigned_rides, report.ride_count),
            format!("{:#}", report.duration),
        ]);
    }

    let total: i64 = reports.iter().map(|report| report.score.total()).sum();
    table.add_row(vec![
        "total".to_string(),
        total.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ]);

    table
}
