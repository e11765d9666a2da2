/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     math.rs
 * Purpose:  Math builtins and the importable `math` module.
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the PROSE programming language project.
 *
 * PROSE is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::collections::HashMap;
use std::f64::consts::PI;

use rand::Rng;

use crate::error::{RuntimeError, RuntimeResult};
use crate::prototypes::{install, number_arg};
use crate::value::Value;

/// Exports of `Import "math".`
///
/// # Installed Functions
/// - `math_sin(x)`, `math_cos(x)`, `math_tan(x)` (radians)
/// - `math_log(x)` natural log, `math_log(x, base)`
/// - `math_pi()`
pub fn create_math_module() -> HashMap<String, Value> {
    let mut math = HashMap::new();

    install(&mut math, "math_sin", |args| {
        Ok(Value::Number(number_arg(&args, 0, "math_sin")?.sin()))
    });
    install(&mut math, "math_cos", |args| {
        Ok(Value::Number(number_arg(&args, 0, "math_cos")?.cos()))
    });
    install(&mut math, "math_tan", |args| {
        Ok(Value::Number(number_arg(&args, 0, "math_tan")?.tan()))
    });
    install(&mut math, "math_log", math_log);
    install(&mut math, "math_pi", |_| Ok(Value::Number(PI)));

    math
}

fn math_log(args: Vec<Value>) -> RuntimeResult<Value> {
    let x = number_arg(&args, 0, "math_log")?;
    if x <= 0.0 {
        return Err(RuntimeError::new("'math_log' needs a number above zero."));
    }
    match args.get(1) {
        Some(_) => {
            let base = number_arg(&args, 1, "math_log")?;
            Ok(Value::Number(x.ln() / base.ln()))
        }
        None => Ok(Value::Number(x.ln())),
    }
}

/* --------------------------------------------------------------------------
 * Builtins
 * -------------------------------------------------------------------------- */

/// `round X [to N places]`
///
/// Ties go to the even neighbour: `round 2.5` is `2`, `round 3.5` is `4`.
/// Without places (or with places at or below zero) the result is whole.
pub fn round(x: f64, places: Option<i64>) -> f64 {
    match places {
        Some(p) if p > 0 => {
            let factor = 10f64.powi(p.min(15) as i32);
            round_half_even(x * factor) / factor
        }
        _ => round_half_even(x),
    }
}

fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

/// `square root of X`
pub fn square_root(x: f64) -> RuntimeResult<f64> {
    if x < 0.0 {
        return Err(RuntimeError::new(
            "I cannot take the square root of a negative number.",
        ));
    }
    Ok(x.sqrt())
}

/// `random number between A and B`, inclusive.
///
/// Two whole bounds give a whole number. Otherwise the result is uniform
/// over the range, rounded to six places.
pub fn random_between(a: f64, b: f64) -> f64 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mut rng = rand::thread_rng();

    if low.fract() == 0.0 && high.fract() == 0.0 {
        return rng.gen_range(low as i64..=high as i64) as f64;
    }
    if low == high {
        return low;
    }
    round(rng.gen_range(low..=high), Some(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_ties_to_even() {
        assert_eq!(round(2.5, None), 2.0);
        assert_eq!(round(3.5, None), 4.0);
        assert_eq!(round(-2.5, None), -2.0);
        assert_eq!(round(2.6, None), 3.0);
        assert_eq!(round(3.14159, Some(2)), 3.14);
        assert_eq!(round(17.0, Some(0)), 17.0);
    }

    #[test]
    fn square_root_rejects_negatives() {
        assert_eq!(square_root(9.0), Ok(3.0));
        assert_eq!(
            square_root(-1.0).unwrap_err().message,
            "I cannot take the square root of a negative number."
        );
    }

    #[test]
    fn random_stays_in_range() {
        for _ in 0..50 {
            let n = random_between(1.0, 6.0);
            assert!((1.0..=6.0).contains(&n));
            assert_eq!(n.fract(), 0.0);

            let x = random_between(0.5, 0.75);
            assert!((0.5..=0.75).contains(&x));
        }
        assert_eq!(random_between(4.0, 4.0), 4.0);
    }

    #[test]
    fn module_functions() {
        let math = create_math_module();
        let Some(Value::Native(log)) = math.get("math_log") else {
            panic!("math_log missing");
        };
        assert_eq!(log.call(vec![Value::Number(8.0), Value::Number(2.0)]), Ok(Value::Number(3.0)));

        let Some(Value::Native(pi)) = math.get("math_pi") else {
            panic!("math_pi missing");
        };
        assert_eq!(pi.call(vec![]), Ok(Value::Number(PI)));
    }
}
