pub mod ast;
pub mod numeric;

pub use ast::{
    Bindings, CompiledFn, Compiler, Expr, FullFormParser, ParseError, UnaryFn, SLOT_NAME,
};
pub use numeric::{
    transpose, zero_pad, BicubicInterpolator, ConstructionError, ParametricCurveIntegrator,
    SimpsonIntegrator,
};

/// Parses, compiles, and evaluates a FullForm notation string in one step.
pub fn evaluate_expression(notation: &str, bindings: &Bindings) -> Result<f64, ParseError> {
    let expr = FullFormParser::parse_expression(notation)?;
    let compiled = Compiler::compile(&expr);
    Ok(compiled(bindings))
}
