use serde::{Deserialize, Serialize};

macro_rules! num_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

num_newtype!(GlobalCustNum);
num_newtype!(GlobalAccountNum);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
    Client,
    Group,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Savings,
    Loan,
}

/// Immutable reference to a customer, created by a list screen and passed by
/// value to the detail screen that fetches the full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    pub global_cust_num: GlobalCustNum,
    pub kind: CustomerKind,
    pub display_name: String,
}

impl CustomerIdentity {
    pub fn new(
        global_cust_num: impl Into<String>,
        kind: CustomerKind,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            global_cust_num: GlobalCustNum::new(global_cust_num),
            kind,
            display_name: display_name.into(),
        }
    }
}

/// Immutable reference to an account selected from a customer's account list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub global_account_num: GlobalAccountNum,
    pub kind: AccountKind,
}

impl AccountIdentity {
    pub fn new(global_account_num: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            global_account_num: GlobalAccountNum::new(global_account_num),
            kind,
        }
    }
}
