use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CustomerKind, GlobalAccountNum, GlobalCustNum};

/// Display block shared by all customer detail payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDisplay {
    pub global_cust_num: GlobalCustNum,
    pub display_name: String,
    pub status_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    pub client_display: CustomerDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfi_joining_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    pub group_display: CustomerDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterDetails {
    pub center_display: CustomerDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established_date: Option<NaiveDate>,
    #[serde(default)]
    pub group_count: u32,
}

/// Customer detail record, one variant per customer category. Assembled by
/// the data-access layer from the endpoint matching the identity's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerDetails {
    Client(ClientDetails),
    Group(GroupDetails),
    Center(CenterDetails),
}

impl CustomerDetails {
    pub fn display(&self) -> &CustomerDisplay {
        match self {
            CustomerDetails::Client(details) => &details.client_display,
            CustomerDetails::Group(details) => &details.group_display,
            CustomerDetails::Center(details) => &details.center_display,
        }
    }

    pub fn kind(&self) -> CustomerKind {
        match self {
            CustomerDetails::Client(_) => CustomerKind::Client,
            CustomerDetails::Group(_) => CustomerKind::Group,
            CustomerDetails::Center(_) => CustomerKind::Center,
        }
    }
}

pub const MANDATORY_DEPOSIT: &str = "MANDATORY_DEPOSIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccountDetails {
    pub global_account_num: GlobalAccountNum,
    pub account_state_name: String,
    pub deposit_type_name: String,
    pub savings_balance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_deposit_due_date: Option<NaiveDate>,
}

impl SavingsAccountDetails {
    /// Whether the deposit-due control applies to this account. Only
    /// mandatory-deposit savings accounts carry a deposit schedule.
    pub fn deposit_due_visible(&self) -> bool {
        self.deposit_type_name == MANDATORY_DEPOSIT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAccountDetails {
    pub global_account_num: GlobalAccountNum,
    pub account_state_name: String,
    pub loan_amount: String,
    pub outstanding_balance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_installment_date: Option<NaiveDate>,
}

/// Account detail record, one variant per account category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountDetails {
    Savings(SavingsAccountDetails),
    Loan(LoanAccountDetails),
}

impl AccountDetails {
    pub fn global_account_num(&self) -> &GlobalAccountNum {
        match self {
            AccountDetails::Savings(details) => &details.global_account_num,
            AccountDetails::Loan(details) => &details.global_account_num,
        }
    }

    pub fn account_state_name(&self) -> &str {
        match self {
            AccountDetails::Savings(details) => &details.account_state_name,
            AccountDetails::Loan(details) => &details.account_state_name,
        }
    }
}

/// One entry of the loan officer's customer portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListEntry {
    pub global_cust_num: GlobalCustNum,
    pub display_name: String,
    pub kind: CustomerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersData {
    pub customers: Vec<CustomerListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeEntry {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerChargesDetails {
    pub amount_due: String,
    pub amount_paid: String,
    #[serde(default)]
    pub charges: Vec<ChargeEntry>,
}
