use crate::ast::{Bindings, CompiledFn, Expr, UnaryFn, SLOT_NAME};
use log::warn;
use std::sync::Arc;

/// Compiles an [`Expr`] tree into a directly callable closure.
///
/// Compilation is bottom-up: every child compiles to its own closure before
/// the parent closure captures them, so evaluation walks no tree and parses
/// no text. Compilation never fails — unsupported constructs degrade to a
/// constant-zero closure with a warning, and a missing variable binding
/// evaluates to `0.0` with a warning. Anomalies are only observable on the
/// diagnostic channel; the returned function always produces a number.
pub struct Compiler;

impl Compiler {
    pub fn compile(expr: &Expr) -> CompiledFn {
        match expr {
            Expr::Constant(value) => {
                let value = *value;
                Arc::new(move |_| value)
            }
            Expr::Rational {
                numerator,
                denominator,
            } => {
                let value = *numerator as f64 / *denominator as f64;
                Arc::new(move |_| value)
            }
            Expr::Variable(name) => {
                let name = name.clone();
                Arc::new(move |vars: &Bindings| match vars.get(&name) {
                    Some(value) => *value,
                    None => {
                        warn!("variable `{name}` is not bound, using 0.0 as default value");
                        0.0
                    }
                })
            }
            Expr::Call { head, args } => Self::compile_call(head, args),
            // A lambda compiled through the generic entry point forwards to
            // its body; the caller supplies the slot binding explicitly.
            Expr::Lambda(body) => Self::compile(body),
        }
    }

    /// Compiles to a single-variable function.
    ///
    /// A lambda binds its argument to the reserved slot name; any other
    /// expression binds it to `var`.
    pub fn compile_unary(expr: &Expr, var: &str) -> UnaryFn {
        let bound = match expr {
            Expr::Lambda(_) => SLOT_NAME.to_string(),
            _ => var.to_string(),
        };
        let compiled = Self::compile(expr);
        Arc::new(move |x| {
            let vars = Bindings::from([(bound.clone(), x)]);
            compiled(&vars)
        })
    }

    /// The builtin registry. Every head outside this match compiles to a
    /// constant-zero closure with a warning, as does a known head applied
    /// with the wrong arity.
    fn compile_call(head: &str, args: &[Expr]) -> CompiledFn {
        match head {
            "Plus" => {
                let terms: Vec<CompiledFn> = args.iter().map(Self::compile).collect();
                Arc::new(move |vars| terms.iter().map(|term| term(vars)).sum())
            }
            "Times" => {
                let factors: Vec<CompiledFn> = args.iter().map(Self::compile).collect();
                Arc::new(move |vars| factors.iter().map(|factor| factor(vars)).product())
            }
            "Power" => Self::compile_power(args),
            "Sin" => Self::compile_unary_head(head, args, f64::sin),
            "Cos" => Self::compile_unary_head(head, args, f64::cos),
            "Tan" => Self::compile_unary_head(head, args, f64::tan),
            "Exp" => Self::compile_unary_head(head, args, f64::exp),
            "Sqrt" => Self::compile_unary_head(head, args, f64::sqrt),
            "Log" => Self::compile_log(args),
            _ => {
                warn!("unsupported function head `{head}`, returning 0.0");
                Arc::new(|_| 0.0)
            }
        }
    }

    fn compile_power(args: &[Expr]) -> CompiledFn {
        if args.len() != 2 {
            return Self::arity_fallback("Power", "exactly 2", args.len());
        }

        let base = Self::compile(&args[0]);
        let exponent = Self::compile(&args[1]);

        Arc::new(move |vars| {
            let b = base(vars);
            let e = exponent(vars);

            if b == 0.0 && e < 0.0 {
                warn!("Power: zero base with negative exponent {e}, returning +infinity");
                return f64::INFINITY;
            }
            if b < 0.0 && e.trunc() != e {
                warn!("Power: negative base {b} with non-integer exponent {e}, returning NaN");
                return f64::NAN;
            }

            b.powf(e)
        })
    }

    fn compile_log(args: &[Expr]) -> CompiledFn {
        match args {
            [arg] => {
                let arg = Self::compile(arg);
                Arc::new(move |vars| arg(vars).ln())
            }
            [base, arg] => {
                let base = Self::compile(base);
                let arg = Self::compile(arg);
                Arc::new(move |vars| arg(vars).ln() / base(vars).ln())
            }
            _ => Self::arity_fallback("Log", "1 or 2", args.len()),
        }
    }

    fn compile_unary_head(head: &str, args: &[Expr], op: fn(f64) -> f64) -> CompiledFn {
        if args.len() != 1 {
            return Self::arity_fallback(head, "exactly 1", args.len());
        }
        let arg = Self::compile(&args[0]);
        Arc::new(move |vars| op(arg(vars)))
    }

    fn arity_fallback(head: &str, expected: &str, got: usize) -> CompiledFn {
        warn!("{head} requires {expected} argument(s), but got {got}; returning 0.0");
        Arc::new(|_| 0.0)
    }
}
