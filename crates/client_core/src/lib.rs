use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{
        AccountIdentity, AccountKind, CustomerIdentity, CustomerKind, GlobalAccountNum,
        GlobalCustNum,
    },
    error::FetchError,
    protocol::{
        AccountDetails, CenterDetails, ClientDetails, CustomerChargesDetails, CustomerDetails,
        CustomersData, GroupDetails, LoanAccountDetails, SavingsAccountDetails,
    },
};
use tracing::debug;

pub mod fetch;
pub mod screen;

const PATH_SUFFIX: &str = ".json";

const LOAN_OFFICER_CUSTOMERS_PATH: &str = "/personnel/clients/id-current.json";

const CLIENT_DETAILS_PATH_PREFIX: &str = "/client/num-";
const GROUP_DETAILS_PATH_PREFIX: &str = "/group/num-";
const CENTER_DETAILS_PATH_PREFIX: &str = "/center/num-";

const CLIENT_CHARGES_DETAILS_PATH_PREFIX: &str = "/client/charges/num-";

const SAVINGS_DETAILS_PATH_PREFIX: &str = "/account/savings/num-";
const LOAN_DETAILS_PATH_PREFIX: &str = "/account/loan/num-";

/// Issues the GET and maps the three failure layers onto the fetch error
/// taxonomy: transport errors, server-reported statuses (404 kept distinct
/// from other non-2xx), and body shape mismatches.
async fn get_json<T: DeserializeOwned>(http: &Client, url: String) -> Result<T, FetchError> {
    debug!(%url, "issuing GET");
    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|err| FetchError::Connectivity(err.to_string()))?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound { url });
    }
    if !status.is_success() {
        return Err(FetchError::Server {
            status: status.as_u16(),
            url,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| FetchError::Decode(err.to_string()))
}

/// Typed GETs against the customer endpoints. Holds no mutable state beyond
/// the configured base URL and the HTTP client.
pub struct CustomerService {
    http: Client,
    server_url: String,
}

impl CustomerService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    pub async fn loan_officer_customers(&self) -> Result<CustomersData, FetchError> {
        let url = format!("{}{LOAN_OFFICER_CUSTOMERS_PATH}", self.server_url);
        get_json(&self.http, url).await
    }

    pub async fn client_details(&self, number: &GlobalCustNum) -> Result<ClientDetails, FetchError> {
        let url = format!(
            "{}{CLIENT_DETAILS_PATH_PREFIX}{number}{PATH_SUFFIX}",
            self.server_url
        );
        get_json(&self.http, url).await
    }

    pub async fn group_details(&self, number: &GlobalCustNum) -> Result<GroupDetails, FetchError> {
        let url = format!(
            "{}{GROUP_DETAILS_PATH_PREFIX}{number}{PATH_SUFFIX}",
            self.server_url
        );
        get_json(&self.http, url).await
    }

    pub async fn center_details(&self, number: &GlobalCustNum) -> Result<CenterDetails, FetchError> {
        let url = format!(
            "{}{CENTER_DETAILS_PATH_PREFIX}{number}{PATH_SUFFIX}",
            self.server_url
        );
        get_json(&self.http, url).await
    }

    /// Fetches the detail record matching the customer's category. The match
    /// is exhaustive over the closed set of categories, so a newly added
    /// variant cannot silently fall through.
    pub async fn details_for_customer(
        &self,
        customer: &CustomerIdentity,
    ) -> Result<CustomerDetails, FetchError> {
        match customer.kind {
            CustomerKind::Client => Ok(CustomerDetails::Client(
                self.client_details(&customer.global_cust_num).await?,
            )),
            CustomerKind::Group => Ok(CustomerDetails::Group(
                self.group_details(&customer.global_cust_num).await?,
            )),
            CustomerKind::Center => Ok(CustomerDetails::Center(
                self.center_details(&customer.global_cust_num).await?,
            )),
        }
    }

    /// Charges exist only for clients; groups and centers resolve to `None`
    /// without a network call, and callers treat that as "no details
    /// available" rather than an error.
    pub async fn charges_for_customer(
        &self,
        customer: &CustomerIdentity,
    ) -> Result<Option<CustomerChargesDetails>, FetchError> {
        match customer.kind {
            CustomerKind::Client => {
                let url = format!(
                    "{}{CLIENT_CHARGES_DETAILS_PATH_PREFIX}{}{PATH_SUFFIX}",
                    self.server_url, customer.global_cust_num
                );
                Ok(Some(get_json(&self.http, url).await?))
            }
            CustomerKind::Group | CustomerKind::Center => Ok(None),
        }
    }
}

/// Typed GETs against the account endpoints.
pub struct AccountService {
    http: Client,
    server_url: String,
}

impl AccountService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    pub async fn savings_details(
        &self,
        number: &GlobalAccountNum,
    ) -> Result<SavingsAccountDetails, FetchError> {
        let url = format!(
            "{}{SAVINGS_DETAILS_PATH_PREFIX}{number}{PATH_SUFFIX}",
            self.server_url
        );
        get_json(&self.http, url).await
    }

    pub async fn loan_details(
        &self,
        number: &GlobalAccountNum,
    ) -> Result<LoanAccountDetails, FetchError> {
        let url = format!(
            "{}{LOAN_DETAILS_PATH_PREFIX}{number}{PATH_SUFFIX}",
            self.server_url
        );
        get_json(&self.http, url).await
    }

    pub async fn details_for_account(
        &self,
        account: &AccountIdentity,
    ) -> Result<AccountDetails, FetchError> {
        match account.kind {
            AccountKind::Savings => Ok(AccountDetails::Savings(
                self.savings_details(&account.global_account_num).await?,
            )),
            AccountKind::Loan => Ok(AccountDetails::Loan(
                self.loan_details(&account.global_account_num).await?,
            )),
        }
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
