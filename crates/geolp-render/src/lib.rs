mod expr;
mod report;

pub use expr::{
    format_constraint, format_domain, format_expression, format_linear, format_term, op_latex,
    var_label, RenderError,
};
pub use report::Reporter;
