mod config;
mod enumerate;
mod problem;
mod select;

pub use config::{ReportConfig, ReportMode, SolveConfig, VALID_FORMS, VALID_METHODS};
pub use enumerate::{EnumerateError, FeasibleSet, Vertex, VertexEnumerator, FEASIBILITY_TOL};
pub use problem::{
    Constraint, ConstraintOp, Objective, ObjectiveType, Problem, ProblemError, VarBound,
};
pub use select::{select, select_with, sweep, ObjectiveSweep, SelectError, Solution};
