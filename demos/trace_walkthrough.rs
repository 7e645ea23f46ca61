//! Walk through the step traces of the AES field example.
//!
//! Run with: RUST_LOG=trace cargo run --example trace_walkthrough

use polylab::{
    format_hex, format_poly, parse_exponent, parse_operand, Calculation, FieldConfig, LogSink,
    Operation, Step,
};
use tracing_subscriber::EnvFilter;

fn describe(step: &Step) -> String {
    match *step {
        Step::Mul {
            i,
            b_bit,
            a_before,
            a_after,
            p_before,
            p_after,
        } => format!(
            "[i={}] bBit={} A:{}->{} P:{}->{}",
            i,
            b_bit,
            format_hex(a_before, 2),
            format_hex(a_after, 2),
            format_hex(p_before, 2),
            format_hex(p_after, 2)
        ),
        Step::Reduce {
            carry,
            before,
            after,
        } => format!(
            "[reduce] carry={} {}->{}",
            carry,
            format_hex(before, 2),
            format_hex(after, 2)
        ),
        Step::Mod { before, after } => {
            format!("[mod] {}->{}", format_hex(before, 2), format_hex(after, 2))
        }
        Step::Exp {
            bit,
            base_before,
            base_after,
            acc_before,
            acc_after,
        } => format!(
            "[exp] bit={} base:{}->{} acc:{}->{}",
            bit,
            format_hex(base_before, 2),
            format_hex(base_after, 2),
            format_hex(acc_before, 2),
            format_hex(acc_after, 2)
        ),
        Step::Egcd { a, b, q, r, t0, t1 } => format!(
            "[egcd] u={} v={} q={} r={} t0={} t1={}",
            format_hex(a, 2),
            format_hex(b, 2),
            format_hex(q, 2),
            format_hex(r, 2),
            format_hex(t0, 2),
            format_hex(t1, 2)
        ),
    }
}

fn main() -> Result<(), polylab::FieldError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = FieldConfig::with_default(8)?;
    println!("Field: {}", cfg);
    println!("Modulus: {}", format_poly(cfg.mod_poly()));

    let a = parse_operand("57", &cfg)?;
    let b = parse_operand("13", &cfg)?;
    let n = parse_exponent("2")?;

    for op in [Operation::Mul, Operation::Pow, Operation::Inv, Operation::Div] {
        let calc = Calculation::new(cfg, op)
            .with_a(a)
            .with_b(b)
            .with_exponent(n);

        let mut steps: Vec<Step> = Vec::new();
        let result = calc.evaluate_traced(&mut steps)?;
        println!();
        println!("{} => {}", op, format_hex(result, cfg.hex_width()));
        for step in &steps {
            println!("  {}", describe(step));
        }
    }

    // Same computation, with the steps going to the log instead.
    Calculation::new(cfg, Operation::Mul)
        .with_a(a)
        .with_b(b)
        .evaluate_traced(&mut LogSink)?;

    Ok(())
}
