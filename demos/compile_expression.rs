use fullform_rs::{Bindings, Compiler, FullFormParser};

fn main() {
    pretty_env_logger::init();

    let notation = "Plus[Times[Power[5, Rational[-1, 2]], x], Power[y, 2], Power[z, -1]]";
    let expr = FullFormParser::parse_expression(notation).unwrap();
    println!("parsed:     {expr}");

    let compiled = Compiler::compile(&expr);
    let bindings = Bindings::from([
        ("x".to_string(), 2.0),
        ("y".to_string(), 3.0),
        ("z".to_string(), 4.0),
    ]);
    println!("evaluated:  {}", compiled(&bindings));
    println!(
        "expected:   {}",
        2.0 / 5.0_f64.sqrt() + 3.0 * 3.0 + 1.0 / 4.0
    );

    // A missing binding degrades to 0.0 with a warning (RUST_LOG=warn).
    let incomplete = Bindings::from([("x".to_string(), 2.0), ("y".to_string(), 3.0)]);
    println!("without z:  {}", compiled(&incomplete));

    // Lambdas compile straight to a single-variable function.
    let sin = FullFormParser::parse_function("Sin[#]&").unwrap();
    println!("Sin(0.5)  = {} (expected {})", sin(0.5), 0.5_f64.sin());

    let quadratic =
        FullFormParser::parse_function("Plus[Times[2, Power[#, 2]], Times[3, #], 1]&").unwrap();
    println!("2x^2+3x+1 at x=2: {} (expected 15)", quadratic(2.0));

    // Unknown heads compile to a zero-valued function instead of failing.
    let unsupported = FullFormParser::parse_function("Gamma[x]").unwrap();
    println!("Gamma[x] degrades to: {}", unsupported(2.0));
}
