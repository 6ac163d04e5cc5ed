//! Actor roles and request context

use serde::{Deserialize, Serialize};

/// Acting role supplied by the upstream identity layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Servant,
    Chef,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Servant => "SERVANT",
            Role::Chef => "CHEF",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Role::Customer),
            "SERVANT" => Ok(Role::Servant),
            "CHEF" => Ok(Role::Chef),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acting identity - trusted as-is from the session context
///
/// 服务端不做认证，只做角色守卫；身份由上游会话层注入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Customer, Role::Servant, Role::Chef, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("waiter".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("chef".parse::<Role>().unwrap(), Role::Chef);
        assert_eq!("Servant".parse::<Role>().unwrap(), Role::Servant);
    }
}
