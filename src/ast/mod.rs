use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

mod compiler;
mod parser;

pub use compiler::Compiler;
pub use parser::{FullFormParser, ParseError, Rule};

/// Reserved identifier for the implicit parameter of a lambda (`Sin[#]&`).
///
/// The slot is represented as an ordinary [`Expr::Variable`] carrying this
/// name, which keeps it off-limits for callers' own variables.
pub const SLOT_NAME: &str = "#";

/// Variable bindings supplied at evaluation time.
pub type Bindings = HashMap<String, f64>;

/// A compiled expression: bindings in, number out. Pure and immutable, so a
/// single instance may be called from any number of threads.
pub type CompiledFn = Arc<dyn Fn(&Bindings) -> f64 + Send + Sync>;

/// A compiled single-variable function.
pub type UnaryFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// An immutable FullForm expression tree.
///
/// The grammar never produces sharing, so the tree is strictly owned; a
/// `Lambda` can only appear at the root of a parsed unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    /// Exact ratio folded from a literal `Rational[n, d]` call at parse time.
    Rational { numerator: i64, denominator: i64 },
    Variable(String),
    Call { head: String, args: Vec<Expr> },
    Lambda(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Rational {
                numerator,
                denominator,
            } => write!(f, "Rational[{numerator}, {denominator}]"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Call { head, args } => {
                write!(f, "{head}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            Expr::Lambda(body) => write!(f, "{body}&"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_fullform() {
        let expr = Expr::Call {
            head: "Plus".to_string(),
            args: vec![
                Expr::Call {
                    head: "Times".to_string(),
                    args: vec![Expr::Constant(2.0), Expr::Variable("x".to_string())],
                },
                Expr::Constant(3.0),
            ],
        };
        assert_eq!(expr.to_string(), "Plus[Times[2, x], 3]");
    }

    #[test]
    fn test_display_lambda_and_slot() {
        let expr = Expr::Lambda(Box::new(Expr::Call {
            head: "Sin".to_string(),
            args: vec![Expr::Variable(SLOT_NAME.to_string())],
        }));
        assert_eq!(expr.to_string(), "Sin[#]&");
    }

    #[test]
    fn test_display_rational() {
        let expr = Expr::Rational {
            numerator: -1,
            denominator: 2,
        };
        assert_eq!(expr.to_string(), "Rational[-1, 2]");
    }

    #[test]
    fn test_display_empty_call() {
        let expr = Expr::Call {
            head: "Pi".to_string(),
            args: vec![],
        };
        assert_eq!(expr.to_string(), "Pi[]");
    }
}
