use fullform_rs::{BicubicInterpolator, FullFormParser, ParametricCurveIntegrator, SimpsonIntegrator};

fn main() {
    pretty_env_logger::init();

    // Plain quadrature of a compiled integrand: x^2 over [0, 3].
    let square = FullFormParser::parse_function("Times[#, #]&").unwrap();
    let integrator = SimpsonIntegrator::new(move |x| square(x), 10).unwrap();
    println!("integral of x^2 over [0, 3]: {} (expected 9)", integrator.integrate(0.0, 3.0));

    // Grid values sampled along a parametric curve.
    let grid = vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
        vec![9.0, 10.0, 11.0, 12.0],
        vec![13.0, 14.0, 15.0, 16.0],
    ];
    let interpolator = BicubicInterpolator::new(grid).unwrap();
    println!("grid at (1, 1):     {}", interpolator.interpolate(1.0, 1.0));
    println!("grid at (1.5, 1.5): {}", interpolator.interpolate(1.5, 1.5));

    let x_func = FullFormParser::parse_function("#&").unwrap();
    let y_func = FullFormParser::parse_function("#&").unwrap();
    let curve = ParametricCurveIntegrator::new(&interpolator, x_func, y_func);
    let result = curve.integrate(1.0, 2.0, 8).unwrap();
    println!("diagonal curve integral over [1, 2]: {result} (expected 8.5)");
}
