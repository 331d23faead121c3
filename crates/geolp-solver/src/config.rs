use log::warn;

pub const VALID_METHODS: [&str; 4] = ["geometric", "simplex", "bland", "two_phase"];
pub const VALID_FORMS: [&str; 3] = ["general", "standard", "canonical"];

/// User-facing solve preferences. Unrecognized method/form strings are
/// accepted with a warning; they affect presentation, not feasibility.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub method: String,
    pub problem_form: String,
    pub print_solution: bool,
    pub print_plot: bool,
    pub verbose: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            method: "geometric".to_string(),
            problem_form: "general".to_string(),
            print_solution: true,
            print_plot: false,
            verbose: false,
        }
    }
}

impl SolveConfig {
    pub fn new(method: impl Into<String>, problem_form: impl Into<String>) -> Self {
        let method = method.into();
        if !VALID_METHODS.contains(&method.as_str()) {
            warn!("invalid method '{method}', must be one of {VALID_METHODS:?}");
        }
        let problem_form = problem_form.into();
        if !VALID_FORMS.contains(&problem_form.as_str()) {
            warn!("invalid problem form '{problem_form}', must be one of {VALID_FORMS:?}");
        }
        Self {
            method,
            problem_form,
            ..Self::default()
        }
    }

    /// Reconcile preferences with the problem shape. Plotting is only
    /// supported by 2-D collaborators, so it is disabled for anything bigger.
    pub fn resolve_for(&mut self, num_variables: usize) {
        if self.print_plot && num_variables > 2 {
            self.print_plot = false;
            warn!("plotting is only supported for 2D problems, disabling");
        }
    }
}

/// How the solution report is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Table of every feasible vertex with its objective value
    Coordinates,
    /// Objective-line sweep through the optimal vertex
    Objective,
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ReportMode::Coordinates => "coordinates",
            ReportMode::Objective => "objective",
        })
    }
}

/// Solve preferences plus the presentation mode used by the reporter.
/// Composition of the base config, not a subclass of it.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub base: SolveConfig,
    pub mode: ReportMode,
    /// Step size for the objective-line sweep; only meaningful in
    /// `ReportMode::Objective`
    pub sweep_step: Option<f64>,
}

impl ReportConfig {
    pub fn new(base: SolveConfig, mode: ReportMode, sweep_step: Option<f64>) -> Self {
        let sweep_step = if sweep_step.is_some() && mode != ReportMode::Objective {
            warn!("sweep step is only used in 'objective' mode, ignoring");
            None
        } else {
            sweep_step
        };
        Self {
            base,
            mode,
            sweep_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_method_is_accepted() {
        let config = SolveConfig::new("gradient_descent", "general");
        assert_eq!(config.method, "gradient_descent");
        assert_eq!(config.problem_form, "general");
    }

    #[test]
    fn plot_disabled_for_three_variables() {
        let mut config = SolveConfig::default();
        config.print_plot = true;
        config.resolve_for(3);
        assert!(!config.print_plot);
    }

    #[test]
    fn plot_kept_for_two_variables() {
        let mut config = SolveConfig::default();
        config.print_plot = true;
        config.resolve_for(2);
        assert!(config.print_plot);
    }

    #[test]
    fn sweep_step_dropped_in_coordinates_mode() {
        let config = ReportConfig::new(
            SolveConfig::default(),
            ReportMode::Coordinates,
            Some(2.0),
        );
        assert_eq!(config.sweep_step, None);

        let config = ReportConfig::new(SolveConfig::default(), ReportMode::Objective, Some(2.0));
        assert_eq!(config.sweep_step, Some(2.0));
    }
}
