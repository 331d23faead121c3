use std::collections::HashSet;

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::problem::{Constraint, ConstraintOp, Problem, VarBound};

/// Absolute tolerance for feasibility checks
pub const FEASIBILITY_TOL: f64 = 1e-8;

/// Vertices closer than 10^-8 in every coordinate collapse to one entry
const ROUND_FACTOR: f64 = 1e8;

/// Pivots below this are treated as zero (singular / rank-deficient system)
const PIVOT_TOL: f64 = 1e-12;

/// Enumeration is combinatorial in C(m + k, n); refuse anything bigger than
/// this rather than grind through it
const MAX_COMBINATIONS: u128 = 1_000_000;

/// A feasible corner point of the constraint region
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Display name: `O` for the origin, otherwise `A`, `B`, `C`, ...
    pub name: String,
    /// Coordinates, rounded to 8 decimal digits
    pub point: Vec<f64>,
}

/// Deduplicated feasible vertices in discovery order
#[derive(Debug, Clone, Default)]
pub struct FeasibleSet {
    vertices: Vec<Vertex>,
    seen: HashSet<Vec<u64>>,
    named: usize,
}

impl FeasibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point, deduplicating on its rounded coordinates. The first
    /// all-zero point is named `O`; every other new vertex takes the next
    /// letter in discovery order.
    pub fn insert(&mut self, point: &[f64]) {
        let rounded: Vec<f64> = point.iter().map(|&x| round8(x)).collect();
        let key: Vec<u64> = rounded.iter().map(|x| x.to_bits()).collect();
        if !self.seen.insert(key) {
            return;
        }
        let name = if rounded.iter().all(|&x| x == 0.0) {
            "O".to_string()
        } else {
            let name = letter_name(self.named);
            self.named += 1;
            name
        };
        self.vertices.push(Vertex {
            name,
            point: rounded,
        });
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// An empty set after enumeration means the problem is infeasible
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeasibleSet {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

fn round8(x: f64) -> f64 {
    let r = (x * ROUND_FACTOR).round() / ROUND_FACTOR;
    // collapse -0.0 so it keys identically to 0.0
    if r == 0.0 { 0.0 } else { r }
}

/// Spreadsheet-style letters: A..Z, AA, AB, ...
fn letter_name(mut index: usize) -> String {
    let mut chars = Vec::new();
    loop {
        chars.push(b'A' + (index % 26) as u8);
        index /= 26;
        if index == 0 {
            break;
        }
        index -= 1;
    }
    chars.reverse();
    String::from_utf8(chars).unwrap_or_default()
}

#[derive(Error, Debug, PartialEq)]
pub enum EnumerateError {
    #[error("variable {index} has unsupported bound '{bound}'; only '>=0' and 'free' are handled")]
    UnsupportedBound { index: usize, bound: VarBound },
    #[error("C({rows}, {vars}) constraint combinations exceed the enumeration limit of {limit}")]
    TooManyCombinations {
        rows: usize,
        vars: usize,
        limit: u128,
    },
}

/// Enumerates feasible vertices by intersecting every choice of `n`
/// constraint boundaries. Exhaustive geometry, not simplex pivoting, so it
/// only suits textbook-sized problems.
pub struct VertexEnumerator {
    tolerance: f64,
}

impl Default for VertexEnumerator {
    fn default() -> Self {
        Self {
            tolerance: FEASIBILITY_TOL,
        }
    }
}

impl VertexEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enumerate every feasible vertex of the problem. An empty result
    /// signals infeasibility and is not an error.
    pub fn enumerate(&self, problem: &Problem) -> Result<FeasibleSet, EnumerateError> {
        let n = problem.num_variables();
        let rows = self.augmented_rows(problem)?;

        if binomial(rows.len(), n) > MAX_COMBINATIONS {
            return Err(EnumerateError::TooManyCombinations {
                rows: rows.len(),
                vars: n,
                limit: MAX_COMBINATIONS,
            });
        }

        let mut set = FeasibleSet::new();
        for combo in (0..rows.len()).combinations(n) {
            let a: Vec<&[f64]> = combo.iter().map(|&i| rows[i].coefficients.as_slice()).collect();
            let b: Vec<f64> = combo.iter().map(|&i| rows[i].rhs).collect();

            // Singular systems (parallel or redundant boundaries) yield no
            // unique point and are skipped as part of normal operation.
            let Some(point) = solve_square(&a, &b) else {
                continue;
            };

            if rows.iter().all(|c| c.satisfied_by(&point, self.tolerance)) {
                set.insert(&point);
            }
        }
        if set.is_empty() {
            warn!("no feasible vertex found; the problem is infeasible");
        }
        Ok(set)
    }

    /// The constraint rows plus one synthetic `e_i . x >= 0` row per
    /// non-negative variable. Free variables contribute nothing; the other
    /// bound tags have no enumeration-time materialization and are rejected
    /// outright instead of being silently ignored.
    fn augmented_rows(&self, problem: &Problem) -> Result<Vec<Constraint>, EnumerateError> {
        let n = problem.num_variables();
        let mut rows = problem.constraints.clone();
        for (index, &bound) in problem.bounds.iter().enumerate() {
            match bound {
                VarBound::NonNegative => {
                    let mut coefficients = vec![0.0; n];
                    coefficients[index] = 1.0;
                    rows.push(Constraint {
                        coefficients,
                        op: ConstraintOp::Ge,
                        rhs: 0.0,
                    });
                }
                VarBound::Free => {}
                VarBound::NonPositive | VarBound::Zero => {
                    return Err(EnumerateError::UnsupportedBound { index, bound });
                }
            }
        }
        Ok(rows)
    }
}

/// Solve the square system `a * x = b` by Gaussian elimination with partial
/// pivoting. Returns `None` when the matrix is singular to working precision.
fn solve_square(a: &[&[f64]], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    let mut m: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut r = row.to_vec();
            r.push(rhs);
            r
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))?;
        if m[pivot_row][col].abs() < PIVOT_TOL {
            return None;
        }
        m.swap(col, pivot_row);

        let pivot = m[col][col];
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = m[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    Some((0..n).map(|i| m[i][n] / m[i][i]).collect())
}

/// C(n, k), saturating as soon as the count passes the enumeration limit.
/// Each partial product is itself an exact binomial, so the early exit never
/// misjudges and the multiply cannot overflow.
fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k as u128 {
        result = result * (n as u128 - i) / (i + 1);
        if result > MAX_COMBINATIONS {
            return u128::MAX;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{ObjectiveType, Problem};

    fn textbook_problem() -> Problem {
        // max 3x1 + 5x2
        //   x1 <= 4, 2x2 <= 12, 3x1 + 2x2 <= 18, x1, x2 >= 0
        let mut problem = Problem::new(vec![3.0, 5.0], ObjectiveType::Max);
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 4.0).unwrap();
        problem.add_constraint(vec![0.0, 2.0], ConstraintOp::Le, 12.0).unwrap();
        problem.add_constraint(vec![3.0, 2.0], ConstraintOp::Le, 18.0).unwrap();
        problem
            .set_bounds(vec![VarBound::NonNegative, VarBound::NonNegative])
            .unwrap();
        problem
    }

    fn contains_point(set: &FeasibleSet, point: &[f64]) -> bool {
        set.iter().any(|v| {
            v.point
                .iter()
                .zip(point)
                .all(|(a, b)| (a - b).abs() < 1e-6)
        })
    }

    #[test]
    fn enumerates_textbook_vertices() {
        let set = VertexEnumerator::new().enumerate(&textbook_problem()).unwrap();
        assert_eq!(set.len(), 5);
        for point in [
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 3.0],
            [2.0, 6.0],
            [0.0, 6.0],
        ] {
            assert!(contains_point(&set, &point), "missing vertex {point:?}");
        }
    }

    #[test]
    fn every_vertex_satisfies_all_constraints() {
        let problem = textbook_problem();
        let set = VertexEnumerator::new().enumerate(&problem).unwrap();
        for vertex in &set {
            for c in &problem.constraints {
                assert!(
                    c.satisfied_by(&vertex.point, FEASIBILITY_TOL),
                    "{} violates a constraint",
                    vertex.name
                );
            }
        }
    }

    #[test]
    fn origin_is_named_o() {
        let set = VertexEnumerator::new().enumerate(&textbook_problem()).unwrap();
        let origin = set
            .iter()
            .find(|v| v.point.iter().all(|&x| x == 0.0))
            .expect("origin should be feasible");
        assert_eq!(origin.name, "O");
        // the other vertices take successive letters
        let letters: Vec<&str> = set
            .iter()
            .filter(|v| v.name != "O")
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(letters, ["A", "B", "C", "D"]);
    }

    #[test]
    fn infeasible_system_yields_empty_set() {
        // x1 >= 5 and x1 <= 2 cannot both hold
        let mut problem = Problem::new(vec![1.0, 1.0], ObjectiveType::Max);
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Ge, 5.0).unwrap();
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 2.0).unwrap();
        problem
            .set_bounds(vec![VarBound::NonNegative, VarBound::NonNegative])
            .unwrap();

        let set = VertexEnumerator::new().enumerate(&problem).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_intersections_collapse() {
        // x1 + x2 <= 2 and x1 + x2 = 2 share an entire boundary; the corners
        // they generate with the axes must appear once each.
        let mut problem = Problem::new(vec![1.0, 1.0], ObjectiveType::Max);
        problem.add_constraint(vec![1.0, 1.0], ConstraintOp::Le, 2.0).unwrap();
        problem.add_constraint(vec![1.0, 1.0], ConstraintOp::Eq, 2.0).unwrap();
        problem
            .set_bounds(vec![VarBound::NonNegative, VarBound::NonNegative])
            .unwrap();

        let set = VertexEnumerator::new().enumerate(&problem).unwrap();
        assert_eq!(set.len(), 2);
        assert!(contains_point(&set, &[2.0, 0.0]));
        assert!(contains_point(&set, &[0.0, 2.0]));
    }

    #[test]
    fn parallel_constraints_are_skipped() {
        // x1 <= 1 and x1 <= 3 never intersect in a unique point; the region
        // is still bounded by the other rows.
        let mut problem = Problem::new(vec![1.0, 1.0], ObjectiveType::Max);
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 1.0).unwrap();
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 3.0).unwrap();
        problem.add_constraint(vec![0.0, 1.0], ConstraintOp::Le, 1.0).unwrap();
        problem
            .set_bounds(vec![VarBound::NonNegative, VarBound::NonNegative])
            .unwrap();

        let set = VertexEnumerator::new().enumerate(&problem).unwrap();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn equality_constraints_restrict_the_region() {
        // x1 + x2 = 4 with 0 <= x1 <= 3: the segment has two endpoints
        let mut problem = Problem::new(vec![1.0, 0.0], ObjectiveType::Max);
        problem.add_constraint(vec![1.0, 1.0], ConstraintOp::Eq, 4.0).unwrap();
        problem.add_constraint(vec![1.0, 0.0], ConstraintOp::Le, 3.0).unwrap();
        problem
            .set_bounds(vec![VarBound::NonNegative, VarBound::NonNegative])
            .unwrap();

        let set = VertexEnumerator::new().enumerate(&problem).unwrap();
        assert_eq!(set.len(), 2);
        assert!(contains_point(&set, &[3.0, 1.0]));
        assert!(contains_point(&set, &[0.0, 4.0]));
    }

    #[test]
    fn unsupported_bound_is_rejected() {
        let mut problem = Problem::new(vec![1.0, 1.0], ObjectiveType::Max);
        problem
            .set_bounds(vec![VarBound::NonNegative, VarBound::NonPositive])
            .unwrap();
        let err = VertexEnumerator::new().enumerate(&problem).unwrap_err();
        assert_eq!(
            err,
            EnumerateError::UnsupportedBound {
                index: 1,
                bound: VarBound::NonPositive
            }
        );
    }

    #[test]
    fn combination_guard_trips_on_pathological_sizes() {
        let n = 40;
        let mut problem = Problem::new(vec![1.0; n], ObjectiveType::Max);
        for i in 0..n {
            let mut row = vec![0.0; n];
            row[i] = 1.0;
            problem.add_constraint(row, ConstraintOp::Le, 1.0).unwrap();
        }
        problem.set_bounds(vec![VarBound::NonNegative; n]).unwrap();

        let err = VertexEnumerator::new().enumerate(&problem).unwrap_err();
        assert!(matches!(err, EnumerateError::TooManyCombinations { .. }));
    }

    #[test]
    fn letter_names_extend_past_z() {
        assert_eq!(letter_name(0), "A");
        assert_eq!(letter_name(25), "Z");
        assert_eq!(letter_name(26), "AA");
        assert_eq!(letter_name(27), "AB");
    }

    #[test]
    fn near_duplicate_points_share_one_vertex() {
        let mut set = FeasibleSet::new();
        set.insert(&[2.0, 6.0]);
        set.insert(&[2.0 + 1e-10, 6.0 - 1e-10]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn negative_zero_collapses_to_origin() {
        let mut set = FeasibleSet::new();
        set.insert(&[-1e-12, 0.0]);
        assert_eq!(set.vertices()[0].name, "O");
        assert_eq!(set.vertices()[0].point, vec![0.0, 0.0]);
    }

    #[test]
    fn solve_square_rejects_singular() {
        let a: Vec<&[f64]> = vec![&[1.0, 2.0], &[2.0, 4.0]];
        assert!(solve_square(&a, &[1.0, 2.0]).is_none());

        let a: Vec<&[f64]> = vec![&[1.0, 0.0], &[1.0, 1.0]];
        let x = solve_square(&a, &[3.0, 5.0]).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }
}
