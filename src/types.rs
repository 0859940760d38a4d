// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// The four authorization levels known to the backend.
///
/// Wire-facing records keep their role as a plain string so unknown codes
/// survive a round trip; this enum is for places where the set is closed
/// (route tables, CLI arguments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Designer,
    Developer,
    Tester,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Designer, Role::Developer, Role::Tester];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Designer => "designer",
            Role::Developer => "developer",
            Role::Tester => "tester",
        }
    }

    pub fn parse(code: &str) -> Option<Role> {
        match code {
            "admin" => Some(Role::Admin),
            "designer" => Some(Role::Designer),
            "developer" => Some(Role::Developer),
            "tester" => Some(Role::Tester),
            _ => None,
        }
    }

    /// Swedish display label for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administratör",
            Role::Designer => "Designer",
            Role::Developer => "Utvecklare",
            Role::Tester => "Testare",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| format!("okänd roll: {s}"))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total display-name lookup: the four known codes map to fixed labels,
/// any other code comes back unchanged.
pub fn role_display_name(code: &str) -> &str {
    match Role::parse(code) {
        Some(role) => role.display_name(),
        None => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lookup_is_total() {
        assert_eq!(role_display_name("admin"), "Administratör");
        assert_eq!(role_display_name("designer"), "Designer");
        assert_eq!(role_display_name("developer"), "Utvecklare");
        assert_eq!(role_display_name("tester"), "Testare");
        // identity fallback for unknown codes
        assert_eq!(role_display_name("granskare"), "granskare");
        assert_eq!(role_display_name(""), "");
    }

    #[test]
    fn role_parses_codes() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("root"), None);
    }
}
