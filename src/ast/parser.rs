use crate::ast::{Compiler, CompiledFn, Expr, UnaryFn, SLOT_NAME};
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "fullform.pest"]
pub struct FullFormParser;

/// Conventional variable bound by [`FullFormParser::parse_function`] when the
/// parsed text is not a lambda.
const DEFAULT_VARIABLE: &str = "x";

/// Fatal parse failure. No partial tree is ever returned; the position of
/// the offending token is carried inside the error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("parse error: {0}")]
    Syntax(Box<pest::error::Error<Rule>>),
    #[error("invalid number literal `{literal}` at {line}:{column}")]
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
    },
}

impl FullFormParser {
    /// Parses a complete FullForm notation string into an [`Expr`] tree.
    ///
    /// A trailing `&` wraps the result in [`Expr::Lambda`]; a two-literal
    /// `Rational[n, d]` call is folded into [`Expr::Rational`] on the spot.
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        debug!("parsing notation: {input}");
        let notation = FullFormParser::parse(Rule::notation, input)
            .map_err(|e| ParseError::Syntax(Box::new(e)))?
            .next()
            .unwrap();

        let mut expr = None;
        let mut lambda = false;
        for pair in notation.into_inner() {
            match pair.as_rule() {
                Rule::expr => expr = Some(Self::build_expr(pair)?),
                Rule::lambda_marker => lambda = true,
                Rule::EOI => {}
                rule => debug!("ignoring unexpected rule {rule:?} at top level"),
            }
        }

        // The grammar guarantees exactly one expr before the optional marker.
        let expr = expr.unwrap();

        if lambda {
            Ok(Expr::Lambda(Box::new(expr)))
        } else {
            Ok(expr)
        }
    }

    /// Parses and compiles to a single-variable function.
    ///
    /// A lambda binds its argument to the `#` slot; any other expression is
    /// treated as a function of the conventional variable `x`.
    pub fn parse_function(input: &str) -> Result<UnaryFn, ParseError> {
        let expr = Self::parse_expression(input)?;
        Ok(Compiler::compile_unary(&expr, DEFAULT_VARIABLE))
    }

    /// Parses and compiles to a function over an explicit binding map.
    pub fn parse_multivar_function(input: &str) -> Result<CompiledFn, ParseError> {
        let expr = Self::parse_expression(input)?;
        Ok(Compiler::compile(&expr))
    }

    fn build_expr(pair: Pair<Rule>) -> Result<Expr, ParseError> {
        match pair.as_rule() {
            // expr wraps exactly one alternative.
            Rule::expr => Self::build_expr(pair.into_inner().next().unwrap()),
            Rule::number => {
                let literal = pair.as_str();
                let (line, column) = pair.as_span().start_pos().line_col();
                literal
                    .parse::<f64>()
                    .map(Expr::Constant)
                    .map_err(|_| ParseError::InvalidNumber {
                        literal: literal.to_string(),
                        line,
                        column,
                    })
            }
            Rule::identifier => Ok(Expr::Variable(pair.as_str().to_string())),
            Rule::slot => Ok(Expr::Variable(SLOT_NAME.to_string())),
            Rule::call => Self::build_call(pair),
            rule => Err(ParseError::Syntax(Box::new(
                pest::error::Error::new_from_span(
                    pest::error::ErrorVariant::CustomError {
                        message: format!("unexpected rule {rule:?} in expression"),
                    },
                    pair.as_span(),
                ),
            ))),
        }
    }

    fn build_call(pair: Pair<Rule>) -> Result<Expr, ParseError> {
        let mut inner = pair.into_inner();
        let head = inner.next().unwrap().as_str().to_string();

        let mut args = Vec::new();
        if let Some(list) = inner.next() {
            for arg in list.into_inner() {
                args.push(Self::build_expr(arg)?);
            }
        }

        Ok(Self::fold_rational(head, args))
    }

    /// A `Rational` call whose two arguments are numeric literals becomes an
    /// exact-ratio node, numerator and denominator truncated toward zero.
    /// Anything else keeps its generic call form.
    fn fold_rational(head: String, args: Vec<Expr>) -> Expr {
        if head == "Rational" && args.len() == 2 {
            if let (Expr::Constant(num), Expr::Constant(denom)) = (&args[0], &args[1]) {
                return Expr::Rational {
                    numerator: *num as i64,
                    denominator: *denom as i64,
                };
            }
        }
        Expr::Call { head, args }
    }
}
