use geolp_solver::{
    FeasibleSet, Objective, ObjectiveSweep, ObjectiveType, Problem, ReportConfig, ReportMode,
    Solution,
};

use crate::expr::{format_constraint, format_domain, format_linear, RenderError};

/// Builds the LaTeX-flavored problem summary and solution reports. The text
/// is advisory output; callers needing the numbers read the `Solution`.
pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Problem statement: objective line, constraint lines, domain line,
    /// wrapped in one `align*` block.
    pub fn summary(&self, problem: &Problem) -> String {
        let mut lines = vec!["\\[".to_string(), "\\begin{align*}".to_string()];

        let keyword = match problem.objective.direction {
            ObjectiveType::Min => "\\text{min}",
            ObjectiveType::Max => "\\text{max}",
        };
        lines.push(format!(
            "{keyword} \\quad & {} \\\\",
            format_linear(&problem.objective.coefficients)
        ));

        for (i, constraint) in problem.constraints.iter().enumerate() {
            let prefix = if i == 0 {
                "\\text{subject to} \\quad & "
            } else {
                "& "
            };
            lines.push(format!("{prefix}{} \\\\", format_constraint(constraint)));
        }

        lines.push(format!("& {}", format_domain(&problem.bounds)));
        lines.push("\\end{align*}".to_string());
        lines.push("\\]".to_string());
        lines.join("\n")
    }

    /// Vertex table with the optimum highlighted. Coordinates mode only.
    pub fn coordinate_report(
        &self,
        set: &FeasibleSet,
        objective: &Objective,
        solution: &Solution,
    ) -> Result<String, RenderError> {
        self.require_mode(ReportMode::Coordinates)?;

        let mut lines = vec![
            "\\[".to_string(),
            "\\begin{array}{lll}".to_string(),
            "\\text{Point} & \\text{Coordinates} & z \\\\".to_string(),
        ];
        for vertex in set {
            lines.push(format!(
                "{} & {} & {} \\\\",
                vertex.name,
                format_point(&vertex.point),
                objective.evaluate(&vertex.point)
            ));
        }
        lines.push("\\end{array}".to_string());
        lines.push("\\]".to_string());
        lines.push(format!(
            "\\text{{Optimal: }} {} = {}, \\quad z^{{*}} = {}",
            solution.vertex_name,
            format_point(&solution.coordinates),
            solution.objective_value
        ));
        Ok(lines.join("\n"))
    }

    /// Objective-line sweep narrative. Objective mode only.
    pub fn objective_report(
        &self,
        objective: &Objective,
        solution: &Solution,
        sweep: &ObjectiveSweep,
    ) -> Result<String, RenderError> {
        self.require_mode(ReportMode::Objective)?;

        let line = format_linear(&objective.coefficients);
        let lines = vec![
            format!(
                "\\text{{Translating the objective line }} {line} = z \\text{{ through }} {} = {}:",
                solution.vertex_name,
                format_point(&solution.coordinates)
            ),
            format!(
                "\\[ z = {}, \\quad z = {}, \\quad z = {} \\]",
                sweep.below, sweep.at, sweep.above
            ),
            format!(
                "\\text{{The line leaves the feasible region at }} z^{{*}} = {}",
                sweep.at
            ),
        ];
        Ok(lines.join("\n"))
    }

    /// Distinct outcome for an empty feasible set; never conflated with a
    /// vertex result.
    pub fn infeasible_report(&self) -> String {
        "\\text{No feasible solution: the constraints admit no vertex.}".to_string()
    }

    fn require_mode(&self, requested: ReportMode) -> Result<(), RenderError> {
        if self.config.mode != requested {
            return Err(RenderError::ModeMismatch {
                configured: self.config.mode,
                requested,
            });
        }
        Ok(())
    }
}

fn format_point(point: &[f64]) -> String {
    let coords: Vec<String> = point.iter().map(|x| format!("{x}")).collect();
    format!("({})", coords.join(", "))
}
