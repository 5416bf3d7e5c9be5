//! # Equation Generation
//!
//! Pure builders producing an (operand1, operand2, result) triple plus the
//! display string shown to the player. Subtraction and division are
//! derived presentations of an addition/multiplication draw: the triple is
//! generated with the inverse operator's ranges and re-read with the
//! answer moved to the operand side. That means their displayed operands
//! are not bounded by the flag ranges themselves: the subtraction minuend
//! is distributed as the sum of two addition draws. Intentional; keep it.

use crate::core::config::GameConfig;
use crate::core::rng::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

/// One drill question. Immutable once generated; solving it produces a
/// fresh one rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub operand1: u32,
    pub operand2: u32,
    pub result: u32,
    /// `"{operand1} {op} {operand2} = "`, trailing space included; typed
    /// digits are appended visually after it.
    pub display: String,
}

impl Equation {
    /// Draw a uniformly random operator from the configured set, then
    /// build an equation for it.
    pub fn generate(config: &GameConfig, rng: &mut GameRng) -> Self {
        let op = *rng.choose(&config.operators);
        Self::for_operator(config, op, rng)
    }

    pub fn for_operator(config: &GameConfig, op: Operator, rng: &mut GameRng) -> Self {
        let (operand1, operand2, result) = match op {
            Operator::Add => addition_triple(config, rng),
            Operator::Sub => {
                // (x + y = sum) read as (sum - y = x)
                let (x, y, sum) = addition_triple(config, rng);
                (sum, y, x)
            }
            Operator::Mul => multiplication_triple(config, rng),
            Operator::Div => {
                // (x * y = product) read as (product / y = x)
                let (x, y, product) = multiplication_triple(config, rng);
                (product, y, x)
            }
        };
        Self {
            operand1,
            operand2,
            result,
            display: format!("{operand1} {} {operand2} = ", op.symbol()),
        }
    }

    /// The decimal string the input buffer is compared against.
    pub fn answer(&self) -> String {
        self.result.to_string()
    }
}

fn addition_triple(config: &GameConfig, rng: &mut GameRng) -> (u32, u32, u32) {
    let a1 = rng.range_inclusive(config.add1.min, config.add1.max);
    let a2 = rng.range_inclusive(config.add2.min, config.add2.max);
    (a1, a2, a1 + a2)
}

fn multiplication_triple(config: &GameConfig, rng: &mut GameRng) -> (u32, u32, u32) {
    let m1 = rng.range_inclusive(config.mul1.min, config.mul1.max);
    let m2 = rng.range_inclusive(config.mul2.min, config.mul2.max);
    (m1, m2, m1 * m2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FileConfig, Overrides, resolve};

    fn test_config(operators: &str) -> GameConfig {
        let cli = Overrides {
            operators: Some(operators.to_string()),
            ..Default::default()
        };
        resolve(&FileConfig::default(), &cli).unwrap()
    }

    #[test]
    fn test_addition_triple_is_exact() {
        let config = test_config("+");
        let mut rng = GameRng::new(1);
        for _ in 0..500 {
            let eq = Equation::for_operator(&config, Operator::Add, &mut rng);
            assert_eq!(eq.operand1 + eq.operand2, eq.result);
            assert!((config.add1.min..=config.add1.max).contains(&eq.operand1));
            assert!((config.add2.min..=config.add2.max).contains(&eq.operand2));
        }
    }

    #[test]
    fn test_multiplication_triple_is_exact() {
        let config = test_config("*");
        let mut rng = GameRng::new(2);
        for _ in 0..500 {
            let eq = Equation::for_operator(&config, Operator::Mul, &mut rng);
            assert_eq!(eq.operand1 * eq.operand2, eq.result);
            assert!((config.mul1.min..=config.mul1.max).contains(&eq.operand1));
            assert!((config.mul2.min..=config.mul2.max).contains(&eq.operand2));
        }
    }

    #[test]
    fn test_subtraction_is_derived_from_addition() {
        let config = test_config("-");
        let mut rng = GameRng::new(3);
        for _ in 0..500 {
            let eq = Equation::for_operator(&config, Operator::Sub, &mut rng);
            assert_eq!(eq.operand1 - eq.operand2, eq.result);
            // operand2 and the result come from the addition ranges; the
            // minuend is their sum and may exceed a1_max.
            assert!((config.add2.min..=config.add2.max).contains(&eq.operand2));
            assert!((config.add1.min..=config.add1.max).contains(&eq.result));
            assert_eq!(eq.operand1, eq.result + eq.operand2);
        }
    }

    #[test]
    fn test_division_is_derived_from_multiplication() {
        let config = test_config("/");
        let mut rng = GameRng::new(4);
        for _ in 0..500 {
            let eq = Equation::for_operator(&config, Operator::Div, &mut rng);
            assert_eq!(eq.operand1 / eq.operand2, eq.result);
            assert_eq!(eq.operand1 % eq.operand2, 0, "division must be exact");
            assert!((config.mul2.min..=config.mul2.max).contains(&eq.operand2));
            assert!((config.mul1.min..=config.mul1.max).contains(&eq.result));
        }
    }

    #[test]
    fn test_display_format() {
        let config = test_config("+");
        let mut rng = GameRng::new(5);
        let eq = Equation::for_operator(&config, Operator::Add, &mut rng);
        assert_eq!(
            eq.display,
            format!("{} + {} = ", eq.operand1, eq.operand2)
        );
        assert!(eq.display.ends_with("= "));
    }

    #[test]
    fn test_degenerate_ranges_pin_the_equation() {
        let cli = Overrides {
            a1_min: Some(5),
            a1_max: Some(5),
            a2_min: Some(3),
            a2_max: Some(3),
            operators: Some("+".to_string()),
            ..Default::default()
        };
        let config = resolve(&FileConfig::default(), &cli).unwrap();
        let mut rng = GameRng::new(6);
        let eq = Equation::generate(&config, &mut rng);
        assert_eq!(eq.display, "5 + 3 = ");
        assert_eq!(eq.result, 8);
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let config = test_config("+-*/");
        let mut a = GameRng::new(77);
        let mut b = GameRng::new(77);
        for _ in 0..50 {
            assert_eq!(
                Equation::generate(&config, &mut a),
                Equation::generate(&config, &mut b)
            );
        }
    }

    #[test]
    fn test_operator_choice_roughly_uniform() {
        let config = test_config("+-*/");
        let mut rng = GameRng::new(8);
        let mut counts = [0u32; 4];
        let draws = 40_000;
        for _ in 0..draws {
            let eq = Equation::generate(&config, &mut rng);
            let symbol = eq.display.split_whitespace().nth(1).unwrap();
            let idx = ["+", "-", "*", "/"]
                .iter()
                .position(|s| *s == symbol)
                .unwrap();
            counts[idx] += 1;
        }
        // Each operator expects 10_000 draws; allow 10% slack.
        for count in counts {
            assert!((9_000..=11_000).contains(&count), "skewed operator: {count}");
        }
    }

    #[test]
    fn test_operator_symbol_round_trip() {
        for c in ['+', '-', '*', '/'] {
            assert_eq!(Operator::from_symbol(c).unwrap().symbol(), c);
        }
        assert_eq!(Operator::from_symbol('%'), None);
    }
}
