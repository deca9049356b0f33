use crate::FunExpr;
use std::fmt::Display;

/// Symbolic boolean expression over the values of subformulae at the next observation.
///
/// Variables index into the subformula table of a [`crate::Monitor`].
/// Expressions are meant to be kept in simplified form,
/// which is obtained by building compound expressions through
/// [`BoolExpr::not`], [`BoolExpr::or`] and [`BoolExpr::and`] only.
/// Verdict deduplication compares expressions structurally,
/// so it relies on such normal form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoolExpr {
    /// The false expression.
    False,
    /// The true expression.
    True,
    /// The value of the indexed subformula.
    Var(usize),
    /// The negated value of the indexed subformula.
    NegVar(usize),
    /// Logical negation of an expression.
    Not(Box<BoolExpr>),
    /// Logical disjunction of two expressions.
    Or(Box<(BoolExpr, BoolExpr)>),
    /// Logical conjunction of two expressions.
    And(Box<(BoolExpr, BoolExpr)>),
}

impl From<bool> for BoolExpr {
    fn from(value: bool) -> Self {
        if value { BoolExpr::True } else { BoolExpr::False }
    }
}

impl BoolExpr {
    /// Negation of an already simplified expression, simplified.
    pub fn not(expr: BoolExpr) -> BoolExpr {
        match expr {
            BoolExpr::True => BoolExpr::False,
            BoolExpr::False => BoolExpr::True,
            expr => BoolExpr::Not(Box::new(expr)),
        }
    }

    /// Disjunction of two already simplified expressions, simplified.
    pub fn or(lhs: BoolExpr, rhs: BoolExpr) -> BoolExpr {
        match (lhs, rhs) {
            (BoolExpr::False, rhs) => rhs,
            (lhs, BoolExpr::False) => lhs,
            (BoolExpr::True, _) | (_, BoolExpr::True) => BoolExpr::True,
            (lhs, rhs) => BoolExpr::Or(Box::new((lhs, rhs))),
        }
    }

    /// Conjunction of two already simplified expressions, simplified.
    pub fn and(lhs: BoolExpr, rhs: BoolExpr) -> BoolExpr {
        match (lhs, rhs) {
            (BoolExpr::True, rhs) => rhs,
            (lhs, BoolExpr::True) => lhs,
            (BoolExpr::False, _) | (_, BoolExpr::False) => BoolExpr::False,
            (lhs, rhs) => BoolExpr::And(Box::new((lhs, rhs))),
        }
    }

    /// Rewrites the expression bottom-up according to the absorption rules.
    ///
    /// Simplification is idempotent.
    pub fn simplify(&self) -> BoolExpr {
        match self {
            BoolExpr::False | BoolExpr::True | BoolExpr::Var(_) | BoolExpr::NegVar(_) => {
                self.clone()
            }
            BoolExpr::Not(expr) => BoolExpr::not(expr.simplify()),
            BoolExpr::Or(exprs) => BoolExpr::or(exprs.0.simplify(), exprs.1.simplify()),
            BoolExpr::And(exprs) => BoolExpr::and(exprs.0.simplify(), exprs.1.simplify()),
        }
    }

    /// Whether the expression is either [`BoolExpr::True`] or [`BoolExpr::False`].
    #[inline(always)]
    pub fn is_constant(&self) -> bool {
        matches!(self, BoolExpr::True | BoolExpr::False)
    }

    /// Evaluates a constant expression, or returns `None` if it is still undetermined.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BoolExpr::True => Some(true),
            BoolExpr::False => Some(false),
            _ => None,
        }
    }

    /// Replaces each variable with the corresponding entry of `values`,
    /// i.e., the newly-computed values of the subformulae.
    ///
    /// Panics if a variable is out of bounds.
    pub fn substitute(&self, values: &[BoolExpr]) -> BoolExpr {
        match self {
            BoolExpr::False | BoolExpr::True => self.clone(),
            BoolExpr::Var(var) => values[*var].clone(),
            BoolExpr::NegVar(var) => BoolExpr::not(values[*var].clone()),
            BoolExpr::Not(expr) => BoolExpr::not(expr.substitute(values)),
            BoolExpr::Or(exprs) => BoolExpr::or(exprs.0.substitute(values), exprs.1.substitute(values)),
            BoolExpr::And(exprs) => {
                BoolExpr::and(exprs.0.substitute(values), exprs.1.substitute(values))
            }
        }
    }

    /// Lifts the expression to a [`FunExpr`] by replacing each variable
    /// with the matching (still time-dependent) entry of `current`.
    ///
    /// Panics if a variable is out of bounds.
    pub fn substitute_functional(&self, current: &[FunExpr]) -> FunExpr {
        match self {
            BoolExpr::False | BoolExpr::True => FunExpr::Now(self.clone()),
            BoolExpr::Var(var) => current[*var].clone(),
            BoolExpr::NegVar(var) => FunExpr::Neg(Box::new(current[*var].clone())),
            BoolExpr::Not(expr) => FunExpr::Neg(Box::new(expr.substitute_functional(current))),
            BoolExpr::Or(exprs) => FunExpr::Or(Box::new((
                exprs.0.substitute_functional(current),
                exprs.1.substitute_functional(current),
            ))),
            BoolExpr::And(exprs) => FunExpr::And(Box::new((
                exprs.0.substitute_functional(current),
                exprs.1.substitute_functional(current),
            ))),
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, BoolExpr::Or(_) | BoolExpr::And(_))
    }
}

// Wraps compound operands in parentheses.
struct Operand<'a>(&'a BoolExpr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_compound() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Display for BoolExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoolExpr::False => write!(f, "FALSE"),
            BoolExpr::True => write!(f, "TRUE"),
            BoolExpr::Var(var) => write!(f, "VAR {var}"),
            BoolExpr::NegVar(var) => write!(f, "NOT VAR {var}"),
            BoolExpr::Not(expr) => write!(f, "NOT {}", Operand(expr)),
            BoolExpr::Or(exprs) => write!(f, "{} OR {}", Operand(&exprs.0), Operand(&exprs.1)),
            BoolExpr::And(exprs) => write!(f, "{} AND {}", Operand(&exprs.0), Operand(&exprs.1)),
        }
    }
}
