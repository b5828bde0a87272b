//! Numeric comparison for criteria leaves

use podium_core::Operator;

/// Values closer than this compare as equal
pub const EPSILON: f64 = 1e-9;

/// Compare two stat values with a criteria operator
///
/// Non-finite operands never satisfy a comparison.
pub(crate) fn execute_compare(left: f64, op: Operator, right: f64) -> bool {
    if !left.is_finite() || !right.is_finite() {
        tracing::debug!("Non-finite comparison: {} {} {}, returning false", left, op, right);
        return false;
    }

    let equal = (left - right).abs() < EPSILON;

    match op {
        Operator::Eq => equal,
        Operator::Ne => !equal,
        Operator::Gt => !equal && left > right,
        Operator::Ge => equal || left > right,
        Operator::Lt => !equal && left < right,
        Operator::Le => equal || left < right,
    }
}
