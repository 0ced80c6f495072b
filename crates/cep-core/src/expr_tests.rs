use super::*;
use indexmap::IndexMap;

fn eta(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn literal_evaluates_to_itself() {
    let empty = eta(&[]);
    let env = Env::new(&empty);
    assert_eq!(eval(&Expr::lit(Value::Int(7)), &env), Ok(Value::Int(7)));
}

#[test]
fn var_resolves_from_eta() {
    let e = eta(&[("price", Value::Int(5))]);
    let env = Env::new(&e);
    assert_eq!(eval(&Expr::var("price"), &env), Ok(Value::Int(5)));
}

#[test]
fn unknown_var_is_an_error() {
    let e = eta(&[]);
    let env = Env::new(&e);
    assert_eq!(
        eval(&Expr::var("missing"), &env),
        Err(EvalError::UnknownName("missing".to_string()))
    );
}

#[test]
fn attrs_shadow_eta_on_conflict() {
    let e = eta(&[("price", Value::Int(1))]);
    let attrs = eta(&[("price", Value::Int(99))]);
    let env = Env::merged(&e, &attrs);
    assert_eq!(eval(&Expr::var("price"), &env), Ok(Value::Int(99)));
}

#[test]
fn comparison_yields_boolean_value() {
    let e = eta(&[]);
    let env = Env::new(&e);
    let expr = Expr::Binary(
        BinOp::Gt,
        Box::new(Expr::lit(Value::Int(5))),
        Box::new(Expr::lit(Value::Int(3))),
    );
    assert_eq!(eval_bool(&expr, &env), Ok(true));
}

#[test]
fn and_short_circuits_without_evaluating_rhs() {
    let e = eta(&[]);
    let env = Env::new(&e);
    // rhs references an unbound name; short-circuit must avoid evaluating it.
    let expr = Expr::and(Expr::lit(Value::FALSE), Expr::var("nope"));
    assert_eq!(eval(&expr, &env), Ok(Value::FALSE));
}

#[test]
fn or_short_circuits_without_evaluating_rhs() {
    let e = eta(&[]);
    let env = Env::new(&e);
    let expr = Expr::or(Expr::lit(Value::TRUE), Expr::var("nope"));
    assert_eq!(eval(&expr, &env), Ok(Value::TRUE));
}

#[test]
fn not_inverts_truthiness() {
    let e = eta(&[]);
    let env = Env::new(&e);
    assert_eq!(eval_bool(&Expr::not(Expr::lit(Value::TRUE)), &env), Ok(false));
}

#[test]
fn display_renders_infix_form() {
    let expr = Expr::Binary(
        BinOp::Add,
        Box::new(Expr::var("qty")),
        Box::new(Expr::lit(Value::Int(1))),
    );
    assert_eq!(expr.to_string(), "(qty + 1)");
}
