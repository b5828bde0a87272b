//! Comparison operators for criteria nodes

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator used by every leaf criteria node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
}

impl Operator {
    /// All operators, in symbol-table order
    pub const ALL: [Operator; 6] = [
        Operator::Ge,
        Operator::Gt,
        Operator::Le,
        Operator::Lt,
        Operator::Eq,
        Operator::Ne,
    ];

    /// Canonical symbol for this operator
    pub fn as_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    /// Parse either a symbol (`>=`) or its word alias (`gte`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ">=" | "gte" | "ge" => Ok(Operator::Ge),
            ">" | "gt" => Ok(Operator::Gt),
            "<=" | "lte" | "le" => Ok(Operator::Le),
            "<" | "lt" => Ok(Operator::Lt),
            "==" | "=" | "eq" => Ok(Operator::Eq),
            "!=" | "ne" | "neq" => Ok(Operator::Ne),
            _ => Err(CoreError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_symbol().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols() {
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::Ge);
        assert_eq!(">".parse::<Operator>().unwrap(), Operator::Gt);
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::Le);
        assert_eq!("<".parse::<Operator>().unwrap(), Operator::Lt);
        assert_eq!("==".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::Ne);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("gte".parse::<Operator>().unwrap(), Operator::Ge);
        assert_eq!("GT".parse::<Operator>().unwrap(), Operator::Gt);
        assert_eq!("lte".parse::<Operator>().unwrap(), Operator::Le);
        assert_eq!("lt".parse::<Operator>().unwrap(), Operator::Lt);
        assert_eq!("eq".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!(" ne ".parse::<Operator>().unwrap(), Operator::Ne);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "~=".parse::<Operator>().unwrap_err();
        assert_eq!(err, CoreError::UnknownOperator("~=".to_string()));
        assert_eq!(err.to_string(), "Unknown operator: ~=");
    }

    #[test]
    fn test_symbol_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(op.as_symbol().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Operator::Ge).unwrap();
        assert_eq!(json, r#"">=""#);

        let op: Operator = serde_json::from_str(r#""lte""#).unwrap();
        assert_eq!(op, Operator::Le);

        assert!(serde_json::from_str::<Operator>(r#""between""#).is_err());
    }
}
