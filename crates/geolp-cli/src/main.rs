use clap::{Parser, Subcommand};
use std::path::PathBuf;

use geolp_solver::{
    select, sweep, Problem, ReportConfig, ReportMode, SelectError, SolveConfig, VertexEnumerator,
};
use geolp_render::Reporter;

const DEFAULT_SWEEP_STEP: f64 = 10.0;

#[derive(Parser)]
#[command(name = "geolp")]
#[command(about = "Geometric LP solver: vertex enumeration with LaTeX output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the LaTeX problem summary
    Summary {
        /// JSON problem file
        file: PathBuf,
    },
    /// Solve a problem and print the summary and solution report
    Solve {
        /// JSON problem file
        file: PathBuf,
        /// Report mode (coordinates, objective)
        #[arg(short, long, default_value = "coordinates")]
        mode: String,
        /// Step size for the objective-line sweep
        #[arg(short, long)]
        step: Option<f64>,
        /// Solve method label (geometric, simplex, bland, two_phase)
        #[arg(long, default_value = "geometric")]
        method: String,
        /// Problem form label (general, standard, canonical)
        #[arg(long, default_value = "general")]
        form: String,
    },
    /// Validate a problem file and print its shape
    Check {
        /// JSON problem file
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { file } => {
            let problem = load_problem(&file);
            let config = ReportConfig::new(SolveConfig::default(), ReportMode::Coordinates, None);
            println!("{}", Reporter::new(config).summary(&problem));
        }
        Commands::Solve {
            file,
            mode,
            step,
            method,
            form,
        } => {
            let problem = load_problem(&file);

            let mut base = SolveConfig::new(method, form);
            base.resolve_for(problem.num_variables());
            let mode = parse_mode(&mode);
            let config = ReportConfig::new(base, mode, step);
            let reporter = Reporter::new(config);

            println!("{}", reporter.summary(&problem));
            println!();

            let set = match VertexEnumerator::new().enumerate(&problem) {
                Ok(set) => set,
                Err(e) => {
                    eprintln!("Enumeration error: {}", e);
                    std::process::exit(1);
                }
            };

            match select(&set, &problem.objective) {
                Ok(solution) => {
                    let report = match mode {
                        ReportMode::Coordinates => {
                            reporter.coordinate_report(&set, &problem.objective, &solution)
                        }
                        ReportMode::Objective => {
                            let s = sweep(
                                solution.objective_value,
                                step.unwrap_or(DEFAULT_SWEEP_STEP),
                            );
                            reporter.objective_report(&problem.objective, &solution, &s)
                        }
                    };
                    match report {
                        Ok(text) => println!("{}", text),
                        Err(e) => {
                            eprintln!("Render error: {}", e);
                            std::process::exit(1);
                        }
                    }
                    println!();
                    println!("Status: OPTIMAL");
                    println!(
                        "Optimal vertex: {} = {:?}",
                        solution.vertex_name, solution.coordinates
                    );
                    println!("Objective value: {}", solution.objective_value);
                }
                Err(SelectError::NoFeasibleSolution) => {
                    println!("{}", reporter.infeasible_report());
                    println!();
                    println!("Status: INFEASIBLE");
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { file } => {
            let problem = load_problem(&file);
            println!("\u{2713} {} is valid", file.display());
            println!("  {} variables", problem.num_variables());
            println!("  {} constraints", problem.num_constraints());
            println!("  {} bounds", problem.bounds.len());
        }
    }
}

fn load_problem(file: &PathBuf) -> Problem {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let mut problem: Problem = match serde_json::from_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error in {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = problem.validate() {
        eprintln!("\u{2717} {} is invalid: {}", file.display(), e);
        std::process::exit(1);
    }
    problem
}

fn parse_mode(mode: &str) -> ReportMode {
    match mode {
        "coordinates" => ReportMode::Coordinates,
        "objective" => ReportMode::Objective,
        other => {
            eprintln!("Unknown report mode '{}', using 'coordinates'", other);
            ReportMode::Coordinates
        }
    }
}
