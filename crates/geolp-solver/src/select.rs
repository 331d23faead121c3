use thiserror::Error;

use crate::enumerate::FeasibleSet;
use crate::problem::{Objective, ObjectiveType};

/// The optimal vertex of one solve
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Display name of the optimal vertex
    pub vertex_name: String,
    /// Coordinates of the optimal vertex
    pub coordinates: Vec<f64>,
    /// Objective value there
    pub objective_value: f64,
}

/// Objective-line values `{z - step, z, z + step}` used to illustrate
/// sliding the objective line through the optimum. A display aid, not a
/// separate optimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveSweep {
    pub below: f64,
    pub at: f64,
    pub above: f64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("no feasible solution: the feasible set is empty")]
    NoFeasibleSolution,
}

/// Pick the vertex optimizing a linear objective.
pub fn select(set: &FeasibleSet, objective: &Objective) -> Result<Solution, SelectError> {
    select_with(set, objective.direction, |point| objective.evaluate(point))
}

/// Pick the vertex optimizing an arbitrary objective function. Ties are
/// broken by first occurrence in enumeration order, which is deterministic
/// but carries no geometric meaning.
pub fn select_with<F>(
    set: &FeasibleSet,
    direction: ObjectiveType,
    objective: F,
) -> Result<Solution, SelectError>
where
    F: Fn(&[f64]) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, vertex) in set.iter().enumerate() {
        let value = objective(&vertex.point);
        let better = match best {
            None => true,
            Some((_, best_value)) => match direction {
                ObjectiveType::Max => value > best_value,
                ObjectiveType::Min => value < best_value,
            },
        };
        if better {
            best = Some((index, value));
        }
    }

    let (index, objective_value) = best.ok_or(SelectError::NoFeasibleSolution)?;
    let vertex = &set.vertices()[index];
    Ok(Solution {
        vertex_name: vertex.name.clone(),
        coordinates: vertex.point.clone(),
        objective_value,
    })
}

/// Objective-line values one step either side of the optimum
pub fn sweep(best_z: f64, step: f64) -> ObjectiveSweep {
    ObjectiveSweep {
        below: best_z - step,
        at: best_z,
        above: best_z + step,
    }
}
