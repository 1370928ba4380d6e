//! Schedule quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a
//! completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Lower Bound | max(longest job, busiest machine) |
//! | Avg Utilization | Mean machine busyness over the makespan |
//! | Total Idle Time | Sum over machines of makespan - busy time |
//! | Avg Flow Time | Mean job completion time |
//! | Gap | Relative distance to a reference makespan |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::models::{Schedule, Task, Time};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan: Time,
    /// Trivial makespan lower bound of the instance.
    pub lower_bound: Time,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-machine utilization, indexed by machine.
    pub utilization_by_machine: Vec<f64>,
    /// Total machine idle time before the makespan.
    pub total_idle_time: Time,
    /// Average job completion time.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    pub fn calculate(schedule: &Schedule<'_>) -> Self {
        let inst = schedule.instance();
        let makespan = schedule.makespan();

        let utilization_by_machine: Vec<f64> = (0..inst.num_machines())
            .map(|m| schedule.machine_utilization(m).unwrap_or(0.0))
            .collect();
        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let total_idle_time = (0..inst.num_machines())
            .map(|m| makespan - inst.machine_load(m))
            .fold(0, Time::saturating_add);

        let last = inst.num_tasks() - 1;
        let avg_flow_time = if inst.num_jobs() == 0 {
            0.0
        } else {
            let total: f64 = (0..inst.num_jobs())
                .map(|j| schedule.end_time(Task::new(j, last)) as f64)
                .sum();
            total / inst.num_jobs() as f64
        };

        Self {
            makespan,
            lower_bound: inst.lower_bound(),
            avg_utilization,
            utilization_by_machine,
            total_idle_time,
            avg_flow_time,
        }
    }

    /// Percentage by which the makespan exceeds `reference`.
    ///
    /// Returns `None` if `reference` is not positive.
    pub fn gap_percent(&self, reference: Time) -> Option<f64> {
        (reference > 0).then(|| (self.makespan - reference) as f64 * 100.0 / reference as f64)
    }

    /// Gap to the instance lower bound, in percent.
    pub fn lower_bound_gap_percent(&self) -> Option<f64> {
        self.gap_percent(self.lower_bound)
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_makespan: Time, min_utilization: f64) -> bool {
        self.makespan <= max_makespan && self.avg_utilization >= min_utilization
    }
}
