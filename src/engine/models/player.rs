/// The three seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Mayor,
    Industry,
    Urbanist,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Mayor, Role::Industry, Role::Urbanist];

    pub fn key(self) -> &'static str {
        match self {
            Role::Mayor => "mayor",
            Role::Industry => "industry",
            Role::Urbanist => "urbanist",
        }
    }

    pub fn from_key(key: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.key() == key)
    }
}

/// The two nominating roles. Keeping this separate from `Role` makes a
/// nomination by the Mayor unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisor {
    Industry,
    Urbanist,
}

impl Advisor {
    pub const ALL: [Advisor; 2] = [Advisor::Industry, Advisor::Urbanist];

    pub fn role(self) -> Role {
        match self {
            Advisor::Industry => Role::Industry,
            Advisor::Urbanist => Role::Urbanist,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Advisor::Industry => "industry",
            Advisor::Urbanist => "urbanist",
        }
    }

    pub fn from_key(key: &str) -> Option<Advisor> {
        Advisor::ALL.iter().copied().find(|a| a.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_key(role.key()), Some(role));
        }
        for advisor in Advisor::ALL {
            assert_eq!(Advisor::from_key(advisor.key()), Some(advisor));
            assert_eq!(advisor.role().key(), advisor.key());
        }
        assert_eq!(Role::from_key("banker"), None);
    }
}
