//! Calculator tool: deterministic local expression evaluation.

use async_trait::async_trait;

use crate::error::AbacusError;

use super::Tool;

pub const CALCULATOR: &str = "Calculator";

/// Evaluates a single mathematical expression with `meval`.
///
/// Stateless: the same well-formed expression always yields the same result.
#[derive(Debug, Default)]
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        CALCULATOR
    }

    fn description(&self) -> &str {
        "Answers math questions. The input must be a single mathematical \
         expression made of numbers, parentheses, operators (+, -, *, /, %, ^) \
         and functions such as sqrt, abs, ln, exp, floor, ceil, round. \
         Example input: 12 * (3 + 4)"
    }

    async fn invoke(&self, input: &str) -> Result<String, AbacusError> {
        let expression = input.trim().trim_end_matches('=').trim();
        if expression.is_empty() {
            return Err(AbacusError::tool(CALCULATOR, "empty expression"));
        }

        let value = meval::eval_str(expression).map_err(|e| {
            AbacusError::tool(
                CALCULATOR,
                format!("invalid expression '{expression}': {e}"),
            )
        })?;

        if !value.is_finite() {
            return Err(AbacusError::tool(
                CALCULATOR,
                format!("expression '{expression}' did not evaluate to a finite number"),
            ));
        }

        Ok(format_number(value))
    }
}

/// Integral results print without a decimal point (84, not 84.0).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
