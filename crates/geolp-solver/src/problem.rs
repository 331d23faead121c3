use thiserror::Error;

/// A linear programming problem in general form
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    /// Objective function
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
    /// Per-variable sign restriction; empty means every variable is free
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounds: Vec<VarBound>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub direction: ObjectiveType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveType {
    #[cfg_attr(feature = "serde", serde(rename = "min"))]
    Min,
    #[cfg_attr(feature = "serde", serde(rename = "max"))]
    Max,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

/// Per-variable sign restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarBound {
    #[cfg_attr(feature = "serde", serde(rename = ">=0"))]
    NonNegative,
    #[cfg_attr(feature = "serde", serde(rename = "<=0"))]
    NonPositive,
    #[cfg_attr(feature = "serde", serde(rename = "=0"))]
    Zero,
    #[cfg_attr(feature = "serde", serde(rename = "free"))]
    Free,
}

impl std::fmt::Display for VarBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VarBound::NonNegative => ">=0",
            VarBound::NonPositive => "<=0",
            VarBound::Zero => "=0",
            VarBound::Free => "free",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProblemError {
    #[error("objective has no coefficients")]
    EmptyObjective,
    #[error("constraint {index} has {got} coefficients, expected {expected}")]
    ConstraintLength {
        index: usize,
        got: usize,
        expected: usize,
    },
    #[error("{got} variable bounds given for {expected} variables")]
    BoundCount { got: usize, expected: usize },
}

impl Objective {
    pub fn new(coefficients: Vec<f64>, direction: ObjectiveType) -> Self {
        Self {
            coefficients,
            direction,
        }
    }

    /// Objective value at a point (dot product)
    pub fn evaluate(&self, point: &[f64]) -> f64 {
        dot(&self.coefficients, point)
    }
}

impl Constraint {
    /// Left-hand side value at a point
    pub fn lhs(&self, point: &[f64]) -> f64 {
        dot(&self.coefficients, point)
    }

    /// Whether the point satisfies this constraint within an absolute tolerance
    pub fn satisfied_by(&self, point: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(point);
        match self.op {
            ConstraintOp::Le => lhs <= self.rhs + tolerance,
            ConstraintOp::Ge => lhs >= self.rhs - tolerance,
            ConstraintOp::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl Problem {
    pub fn new(coefficients: Vec<f64>, direction: ObjectiveType) -> Self {
        let n = coefficients.len();
        Self {
            objective: Objective::new(coefficients, direction),
            constraints: Vec::new(),
            bounds: vec![VarBound::Free; n],
        }
    }

    pub fn add_constraint(
        &mut self,
        coefficients: Vec<f64>,
        op: ConstraintOp,
        rhs: f64,
    ) -> Result<(), ProblemError> {
        if coefficients.len() != self.num_variables() {
            return Err(ProblemError::ConstraintLength {
                index: self.constraints.len(),
                got: coefficients.len(),
                expected: self.num_variables(),
            });
        }
        self.constraints.push(Constraint {
            coefficients,
            op,
            rhs,
        });
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Vec<VarBound>) -> Result<(), ProblemError> {
        if bounds.len() != self.num_variables() {
            return Err(ProblemError::BoundCount {
                got: bounds.len(),
                expected: self.num_variables(),
            });
        }
        self.bounds = bounds;
        Ok(())
    }

    /// Check dimensional invariants, filling in default (free) bounds when
    /// none were given. Deserialized problems must pass through here before
    /// being handed to the enumerator.
    pub fn validate(&mut self) -> Result<(), ProblemError> {
        let n = self.num_variables();
        if n == 0 {
            return Err(ProblemError::EmptyObjective);
        }
        for (index, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != n {
                return Err(ProblemError::ConstraintLength {
                    index,
                    got: c.coefficients.len(),
                    expected: n,
                });
            }
        }
        if self.bounds.is_empty() {
            self.bounds = vec![VarBound::Free; n];
        } else if self.bounds.len() != n {
            return Err(ProblemError::BoundCount {
                got: self.bounds.len(),
                expected: n,
            });
        }
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.objective.coefficients.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_constraint_row() {
        let mut problem = Problem::new(vec![1.0, 2.0], ObjectiveType::Max);
        let err = problem
            .add_constraint(vec![1.0, 2.0, 3.0], ConstraintOp::Le, 4.0)
            .unwrap_err();
        assert_eq!(
            err,
            ProblemError::ConstraintLength {
                index: 0,
                got: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn rejects_mismatched_bound_count() {
        let mut problem = Problem::new(vec![1.0, 2.0], ObjectiveType::Min);
        let err = problem.set_bounds(vec![VarBound::NonNegative]).unwrap_err();
        assert_eq!(err, ProblemError::BoundCount { got: 1, expected: 2 });
    }

    #[test]
    fn validate_defaults_missing_bounds_to_free() {
        let mut problem = Problem::new(vec![1.0, -1.0], ObjectiveType::Min);
        problem.bounds.clear();
        problem.validate().unwrap();
        assert_eq!(problem.bounds, vec![VarBound::Free, VarBound::Free]);
    }

    #[test]
    fn constraint_satisfaction_within_tolerance() {
        let c = Constraint {
            coefficients: vec![1.0, 1.0],
            op: ConstraintOp::Le,
            rhs: 4.0,
        };
        assert!(c.satisfied_by(&[2.0, 2.0], 1e-8));
        assert!(c.satisfied_by(&[2.0, 2.0 + 5e-9], 1e-8));
        assert!(!c.satisfied_by(&[2.0, 2.1], 1e-8));

        let eq = Constraint {
            coefficients: vec![1.0, 0.0],
            op: ConstraintOp::Eq,
            rhs: 3.0,
        };
        assert!(eq.satisfied_by(&[3.0, 7.0], 1e-8));
        assert!(!eq.satisfied_by(&[3.1, 7.0], 1e-8));
    }

    #[test]
    fn objective_evaluation() {
        let obj = Objective::new(vec![3.0, 5.0], ObjectiveType::Max);
        assert!((obj.evaluate(&[2.0, 6.0]) - 36.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "objective": { "coefficients": [3, 5], "direction": "max" },
            "constraints": [
                { "coefficients": [1, 0], "op": "<=", "rhs": 4 },
                { "coefficients": [3, 2], "op": "<=", "rhs": 18 }
            ],
            "bounds": [">=0", ">=0"]
        }"#;
        let mut problem: Problem = serde_json::from_str(json).unwrap();
        problem.validate().unwrap();
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.constraints[0].op, ConstraintOp::Le);
        assert_eq!(problem.bounds, vec![VarBound::NonNegative; 2]);

        // bounds may be omitted entirely
        let json = r#"{
            "objective": { "coefficients": [1, -1], "direction": "min" },
            "constraints": []
        }"#;
        let mut problem: Problem = serde_json::from_str(json).unwrap();
        problem.validate().unwrap();
        assert_eq!(problem.bounds, vec![VarBound::Free; 2]);
    }
}
