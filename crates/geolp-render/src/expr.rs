use thiserror::Error;

use geolp_solver::{Constraint, ConstraintOp, ReportMode, VarBound};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("expression has {coefficients} coefficients but {labels} variable labels")]
    InvalidExpression { coefficients: usize, labels: usize },
    #[error("report mode mismatch: configured for '{configured}', requested '{requested}'")]
    ModeMismatch {
        configured: ReportMode,
        requested: ReportMode,
    },
}

/// LaTeX label for the 1-indexed variable `x_{j+1}`
pub fn var_label(index: usize) -> String {
    format!("x_{{{}}}", index + 1)
}

/// Format one signed term of a linear expression.
///
/// Magnitude 1 omits the numeral (`x_{1}`, never `1x_{1}`) and whole-valued
/// magnitudes print without a decimal point. The first term carries a bare
/// `-` only when negative; later terms are joined with `" + "` / `" - "`.
pub fn format_term(coefficient: f64, label: &str, is_first: bool) -> String {
    let magnitude = coefficient.abs();
    let numeral = if magnitude == 1.0 {
        String::new()
    } else {
        format!("{magnitude}")
    };
    let sign = if is_first {
        if coefficient < 0.0 { "-" } else { "" }
    } else if coefficient < 0.0 {
        " - "
    } else {
        " + "
    };
    format!("{sign}{numeral}{label}")
}

/// Assemble a full linear expression, skipping zero coefficients. An all-zero
/// (or empty) coefficient sequence renders as the literal `0`. Handing in a
/// label list of the wrong length is a contract violation.
pub fn format_expression(coefficients: &[f64], labels: &[String]) -> Result<String, RenderError> {
    if coefficients.len() != labels.len() {
        return Err(RenderError::InvalidExpression {
            coefficients: coefficients.len(),
            labels: labels.len(),
        });
    }
    let mut out = String::new();
    let mut is_first = true;
    for (coefficient, label) in coefficients.iter().zip(labels) {
        if *coefficient == 0.0 {
            continue;
        }
        out.push_str(&format_term(*coefficient, label, is_first));
        is_first = false;
    }
    if out.is_empty() {
        out.push('0');
    }
    Ok(out)
}

/// `format_expression` over the default `x_{1}, x_{2}, ...` labels
pub fn format_linear(coefficients: &[f64]) -> String {
    let labels: Vec<String> = (0..coefficients.len()).map(var_label).collect();
    // lengths match by construction
    format_expression(coefficients, &labels).unwrap_or_default()
}

pub fn op_latex(op: ConstraintOp) -> &'static str {
    match op {
        ConstraintOp::Le => "\\leq",
        ConstraintOp::Ge => "\\geq",
        ConstraintOp::Eq => "=",
    }
}

/// One constraint line: formatted left-hand side, relation symbol, rhs
pub fn format_constraint(constraint: &Constraint) -> String {
    format!(
        "{} {} {}",
        format_linear(&constraint.coefficients),
        op_latex(constraint.op),
        constraint.rhs
    )
}

/// The variable-domain line. All-free variables collapse into a single
/// "real" clause; otherwise each variable gets its own clause.
pub fn format_domain(bounds: &[VarBound]) -> String {
    if bounds.iter().all(|&b| b == VarBound::Free) {
        let vars: Vec<String> = (0..bounds.len()).map(var_label).collect();
        return format!("\\text{{for }} {} \\in \\mathbb{{R}}", vars.join(", "));
    }
    let clauses: Vec<String> = bounds
        .iter()
        .enumerate()
        .map(|(i, bound)| {
            let var = var_label(i);
            match bound {
                VarBound::NonNegative => format!("{var} \\geq 0"),
                VarBound::NonPositive => format!("{var} \\leq 0"),
                VarBound::Zero => format!("{var} = 0"),
                VarBound::Free => format!("{var} \\in \\mathbb{{R}}"),
            }
        })
        .collect();
    format!("\\text{{for }} {}", clauses.join(", "))
}
