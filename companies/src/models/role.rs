use serde::{Serialize, Serializer};
use std::fmt;

/// Relationship types linking people to organizations are named `HAS_<ROLE>`.
pub const ROLE_EDGE_PREFIX: &str = "HAS_";

/// Role a person holds at an organization, read from the relationship type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Ceo,
    BoardMember,
    Investor,
    Employee,
    Founder,
    /// Any role label not known at build time, kept verbatim.
    Other(String),
}

impl Role {
    pub fn from_edge_type(edge_type: &str) -> Self {
        let label = edge_type.strip_prefix(ROLE_EDGE_PREFIX).unwrap_or(edge_type);
        match label {
            "CEO" => Role::Ceo,
            "BOARD_MEMBER" => Role::BoardMember,
            "INVESTOR" => Role::Investor,
            "EMPLOYEE" => Role::Employee,
            "FOUNDER" => Role::Founder,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Ceo => "CEO",
            Role::BoardMember => "BOARD_MEMBER",
            Role::Investor => "INVESTOR",
            Role::Employee => "EMPLOYEE",
            Role::Founder => "FOUNDER",
            Role::Other(label) => label,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles() {
        assert_eq!(Role::from_edge_type("HAS_CEO"), Role::Ceo);
        assert_eq!(Role::from_edge_type("HAS_BOARD_MEMBER"), Role::BoardMember);
        assert_eq!(Role::from_edge_type("HAS_INVESTOR"), Role::Investor);
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let role = Role::from_edge_type("HAS_CHIEF_SCIENTIST");
        assert_eq!(role, Role::Other("CHIEF_SCIENTIST".to_string()));
        assert_eq!(role.label(), "CHIEF_SCIENTIST");
    }

    #[test]
    fn test_edge_without_prefix() {
        assert_eq!(
            Role::from_edge_type("WORKS_AT"),
            Role::Other("WORKS_AT".to_string())
        );
    }

    #[test]
    fn test_wire_label_matches_stripped_edge_type() {
        for edge in ["HAS_CEO", "HAS_BOARD_MEMBER", "HAS_FOUNDER", "HAS_ADVISOR"] {
            let role = Role::from_edge_type(edge);
            assert_eq!(
                serde_json::to_value(&role).unwrap(),
                serde_json::json!(edge.trim_start_matches("HAS_"))
            );
        }
    }
}
