//! Engine-neutral MILP representation.
//!
//! The formulation is built into these plain data types and only translated
//! into a concrete backend inside a [`SolveEngine`](crate::planner::engine::SolveEngine).

/// Handle to a variable in a [`MilpProblem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarDomain {
    Binary,
    /// Continuous in `[lower, upper]`; `upper` may be infinite.
    Continuous { lower: f64, upper: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub domain: VarDomain,
}

impl Variable {
    pub fn bounds(&self) -> (f64, f64) {
        match self.domain {
            VarDomain::Binary => (0.0, 1.0),
            VarDomain::Continuous { lower, upper } => (lower, upper),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.domain, VarDomain::Binary)
    }
}

/// `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            constant: 0.0,
        }
    }

    pub fn from_var(var: VarId) -> Self {
        Self {
            terms: vec![(var, 1.0)],
            constant: 0.0,
        }
    }

    /// Add `coef·var`. Zero coefficients are skipped.
    pub fn add_term(&mut self, var: VarId, coef: f64) -> &mut Self {
        if coef != 0.0 {
            self.terms.push((var, coef));
        }
        self
    }

    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    /// Add `factor·other`.
    pub fn add_scaled(&mut self, other: &LinearExpr, factor: f64) -> &mut Self {
        if factor == 0.0 {
            return self;
        }
        for &(var, coef) in &other.terms {
            self.add_term(var, coef * factor);
        }
        self.constant += other.constant * factor;
        self
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = LinearExpr::with_capacity(self.terms.len());
        out.add_scaled(self, factor);
        out
    }

    /// Value of the expression under a variable assignment.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values.get(var.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessEq,
    Equal,
    GreaterEq,
}

/// `expr <cmp> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub cmp: Comparison,
    pub rhs: f64,
}

impl Constraint {
    pub fn leq(expr: LinearExpr, rhs: f64) -> Self {
        Self {
            expr,
            cmp: Comparison::LessEq,
            rhs,
        }
    }

    pub fn eq(expr: LinearExpr, rhs: f64) -> Self {
        Self {
            expr,
            cmp: Comparison::Equal,
            rhs,
        }
    }

    pub fn geq(expr: LinearExpr, rhs: f64) -> Self {
        Self {
            expr,
            cmp: Comparison::GreaterEq,
            rhs,
        }
    }

    /// How far `values` violate the constraint (0 when satisfied).
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = self.expr.evaluate(values);
        match self.cmp {
            Comparison::LessEq => (lhs - self.rhs).max(0.0),
            Comparison::GreaterEq => (self.rhs - lhs).max(0.0),
            Comparison::Equal => (lhs - self.rhs).abs(),
        }
    }
}

/// Variables, constraints, and a minimised objective.
#[derive(Debug, Clone, Default)]
pub struct MilpProblem {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl MilpProblem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), VarDomain::Binary)
    }

    pub fn add_continuous(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        self.push_var(name.into(), VarDomain::Continuous { lower, upper })
    }

    fn push_var(&mut self, name: String, domain: VarDomain) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable { name, domain });
        id
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_binaries(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Largest bound or constraint violation of `values`.
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let bounds = self.variables.iter().enumerate().map(|(i, v)| {
            let x = values.get(i).copied().unwrap_or(0.0);
            let (lo, hi) = v.bounds();
            (lo - x).max(x - hi).max(0.0)
        });
        let rows = self.constraints.iter().map(|c| c.violation(values));
        bounds.chain(rows).fold(0.0, f64::max)
    }
}
