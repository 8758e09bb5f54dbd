//! Screen controllers: one fetch coordinator per screen, lifecycle-aware,
//! rendering fetched records into view regions.

use std::{fmt::Write as _, sync::Arc};

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{AccountIdentity, CustomerIdentity},
    protocol::{AccountDetails, CustomerChargesDetails, CustomerDetails},
};
use tokio::runtime::Handle;
use tracing::debug;

use crate::{
    fetch::{FetchCoordinator, FetchEvent, FetchState, ProgressText},
    AccountService, CustomerService,
};

pub const MSG_NUMBER_NOT_AVAILABLE: &str = "Customer or account number is not available.";

const PROGRESS_MESSAGE: &str = "Loading. Please wait...";
const ACCOUNT_PROGRESS_TITLE: &str = "Getting account data";
const CUSTOMER_PROGRESS_TITLE: &str = "Getting customer data";

/// Rendering collaborator owned by the UI layer. Layout and widget wiring
/// live behind this seam; the controllers only decide what goes where.
pub trait ScreenView {
    fn render_overview(&mut self, text: &str);
    fn render_detail(&mut self, text: &str);
    fn set_deposit_due_visible(&mut self, visible: bool);
    fn show_progress(&mut self, title: &str, message: &str);
    fn hide_progress(&mut self);
    fn show_message(&mut self, message: &str);
}

pub fn account_overview_text(details: &AccountDetails) -> String {
    let mut text = String::new();
    match details {
        AccountDetails::Savings(savings) => {
            let _ = writeln!(text, "Savings account {}", savings.global_account_num);
            let _ = writeln!(text, "Status: {}", savings.account_state_name);
            let _ = writeln!(text, "Balance: {}", savings.savings_balance);
        }
        AccountDetails::Loan(loan) => {
            let _ = writeln!(text, "Loan account {}", loan.global_account_num);
            let _ = writeln!(text, "Status: {}", loan.account_state_name);
            let _ = writeln!(text, "Outstanding: {}", loan.outstanding_balance);
        }
    }
    text
}

pub fn account_detail_text(details: &AccountDetails) -> String {
    let mut text = String::new();
    match details {
        AccountDetails::Savings(savings) => {
            let _ = writeln!(text, "Deposit type: {}", savings.deposit_type_name);
            if let Some(due) = &savings.total_amount_due {
                let _ = writeln!(text, "Amount due: {due}");
            }
            if let Some(date) = savings.next_deposit_due_date {
                let _ = writeln!(text, "Next deposit due: {date}");
            }
        }
        AccountDetails::Loan(loan) => {
            let _ = writeln!(text, "Loan amount: {}", loan.loan_amount);
            if let Some(rate) = &loan.interest_rate {
                let _ = writeln!(text, "Interest rate: {rate}");
            }
            if let Some(date) = loan.next_installment_date {
                let _ = writeln!(text, "Next installment: {date}");
            }
        }
    }
    text
}

pub fn customer_overview_text(details: &CustomerDetails) -> String {
    let display = details.display();
    let mut text = String::new();
    let _ = writeln!(
        text,
        "{} {} ({:?})",
        display.global_cust_num, display.display_name, details.kind()
    );
    let _ = writeln!(text, "Status: {}", display.status_name);
    if let Some(branch) = &display.branch_name {
        let _ = writeln!(text, "Branch: {branch}");
    }
    text
}

pub fn customer_detail_text(
    details: &CustomerDetails,
    charges: Option<&CustomerChargesDetails>,
) -> String {
    let mut text = String::new();
    match details {
        CustomerDetails::Client(client) => {
            if let Some(date) = client.mfi_joining_date {
                let _ = writeln!(text, "MFI joining date: {date}");
            }
            if let Some(external_id) = &client.external_id {
                let _ = writeln!(text, "External id: {external_id}");
            }
        }
        CustomerDetails::Group(group) => {
            let _ = writeln!(text, "Clients in group: {}", group.client_count);
            if let Some(date) = group.trained_date {
                let _ = writeln!(text, "Trained: {date}");
            }
        }
        CustomerDetails::Center(center) => {
            let _ = writeln!(text, "Groups in center: {}", center.group_count);
            if let Some(date) = center.established_date {
                let _ = writeln!(text, "Established: {date}");
            }
        }
    }
    if let Some(charges) = charges {
        let _ = writeln!(
            text,
            "Charges due: {} (paid: {})",
            charges.amount_due, charges.amount_paid
        );
        for charge in &charges.charges {
            let _ = writeln!(text, "  {}: {}", charge.name, charge.amount);
        }
    }
    text
}

/// Serializable carrier for details that survive a teardown/recreation
/// cycle, so a recreated screen renders from cache instead of re-fetching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountScreenSnapshot {
    pub details: Option<AccountDetails>,
}

pub struct AccountDetailsScreen<V: ScreenView> {
    account: AccountIdentity,
    service: Arc<AccountService>,
    runtime: Handle,
    view: V,
    details: Option<AccountDetails>,
    task: Option<FetchCoordinator<AccountDetails>>,
    events_tx: Sender<FetchEvent<AccountDetails>>,
    events_rx: Receiver<FetchEvent<AccountDetails>>,
}

impl<V: ScreenView> AccountDetailsScreen<V> {
    pub fn new(
        account: AccountIdentity,
        service: Arc<AccountService>,
        runtime: Handle,
        view: V,
    ) -> Self {
        Self::restore(
            account,
            service,
            runtime,
            view,
            AccountScreenSnapshot::default(),
        )
    }

    pub fn restore(
        account: AccountIdentity,
        service: Arc<AccountService>,
        runtime: Handle,
        view: V,
        snapshot: AccountScreenSnapshot,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            account,
            service,
            runtime,
            view,
            details: snapshot.details,
            task: None,
            events_tx,
            events_rx,
        }
    }

    pub fn snapshot(&self) -> AccountScreenSnapshot {
        AccountScreenSnapshot {
            details: self.details.clone(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn fetch_state(&self) -> Option<FetchState> {
        self.task.as_ref().map(FetchCoordinator::state)
    }

    pub fn on_session_active(&mut self) {
        if let Some(details) = self.details.clone() {
            self.update_content(&details);
        } else {
            self.run_details_task();
        }
    }

    /// Starts a fetch unless the identifier is missing or one is already in
    /// flight. A finished coordinator is replaced wholesale.
    pub fn run_details_task(&mut self) {
        if self.account.global_account_num.is_empty() {
            self.view.show_message(MSG_NUMBER_NOT_AVAILABLE);
            return;
        }
        if self.task.as_ref().is_some_and(FetchCoordinator::is_running) {
            debug!("account details fetch already in flight");
            return;
        }
        let task = FetchCoordinator::new(
            self.runtime.clone(),
            self.events_tx.clone(),
            ProgressText::new(ACCOUNT_PROGRESS_TITLE, PROGRESS_MESSAGE),
        );
        let service = Arc::clone(&self.service);
        let account = self.account.clone();
        task.start(async move { service.details_for_account(&account).await });
        self.task = Some(task);
    }

    /// Drains pending delivery callbacks on the UI context. Returns the
    /// number of events applied.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    pub fn on_destroy(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    fn apply_event(&mut self, event: FetchEvent<AccountDetails>) {
        match event {
            FetchEvent::ProgressShown { title, message } => {
                self.view.show_progress(&title, &message);
            }
            FetchEvent::ProgressHidden => self.view.hide_progress(),
            FetchEvent::Completed(details) => {
                self.update_content(&details);
                self.details = Some(details);
            }
            FetchEvent::Failed(err) => self.view.show_message(&err.to_string()),
        }
    }

    fn update_content(&mut self, details: &AccountDetails) {
        self.view.render_overview(&account_overview_text(details));
        self.view.render_detail(&account_detail_text(details));
        if let AccountDetails::Savings(savings) = details {
            self.view
                .set_deposit_due_visible(savings.deposit_due_visible());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerScreenSnapshot {
    pub details: Option<CustomerDetails>,
    pub charges: Option<CustomerChargesDetails>,
}

type CustomerFetchResult = (CustomerDetails, Option<CustomerChargesDetails>);

pub struct CustomerDetailsScreen<V: ScreenView> {
    customer: CustomerIdentity,
    service: Arc<CustomerService>,
    runtime: Handle,
    view: V,
    details: Option<CustomerDetails>,
    charges: Option<CustomerChargesDetails>,
    task: Option<FetchCoordinator<CustomerFetchResult>>,
    events_tx: Sender<FetchEvent<CustomerFetchResult>>,
    events_rx: Receiver<FetchEvent<CustomerFetchResult>>,
}

impl<V: ScreenView> CustomerDetailsScreen<V> {
    pub fn new(
        customer: CustomerIdentity,
        service: Arc<CustomerService>,
        runtime: Handle,
        view: V,
    ) -> Self {
        Self::restore(
            customer,
            service,
            runtime,
            view,
            CustomerScreenSnapshot::default(),
        )
    }

    pub fn restore(
        customer: CustomerIdentity,
        service: Arc<CustomerService>,
        runtime: Handle,
        view: V,
        snapshot: CustomerScreenSnapshot,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            customer,
            service,
            runtime,
            view,
            details: snapshot.details,
            charges: snapshot.charges,
            task: None,
            events_tx,
            events_rx,
        }
    }

    pub fn snapshot(&self) -> CustomerScreenSnapshot {
        CustomerScreenSnapshot {
            details: self.details.clone(),
            charges: self.charges.clone(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn fetch_state(&self) -> Option<FetchState> {
        self.task.as_ref().map(FetchCoordinator::state)
    }

    pub fn on_session_active(&mut self) {
        if let Some(details) = self.details.clone() {
            let charges = self.charges.clone();
            self.update_content(&details, charges.as_ref());
        } else {
            self.run_details_task();
        }
    }

    pub fn run_details_task(&mut self) {
        if self.customer.global_cust_num.is_empty() {
            self.view.show_message(MSG_NUMBER_NOT_AVAILABLE);
            return;
        }
        if self.task.as_ref().is_some_and(FetchCoordinator::is_running) {
            debug!("customer details fetch already in flight");
            return;
        }
        let task = FetchCoordinator::new(
            self.runtime.clone(),
            self.events_tx.clone(),
            ProgressText::new(CUSTOMER_PROGRESS_TITLE, PROGRESS_MESSAGE),
        );
        let service = Arc::clone(&self.service);
        let customer = self.customer.clone();
        task.start(async move {
            let details = service.details_for_customer(&customer).await?;
            let charges = service.charges_for_customer(&customer).await?;
            Ok((details, charges))
        });
        self.task = Some(task);
    }

    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    pub fn on_destroy(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    fn apply_event(&mut self, event: FetchEvent<CustomerFetchResult>) {
        match event {
            FetchEvent::ProgressShown { title, message } => {
                self.view.show_progress(&title, &message);
            }
            FetchEvent::ProgressHidden => self.view.hide_progress(),
            FetchEvent::Completed((details, charges)) => {
                self.update_content(&details, charges.as_ref());
                self.details = Some(details);
                self.charges = charges;
            }
            FetchEvent::Failed(err) => self.view.show_message(&err.to_string()),
        }
    }

    fn update_content(
        &mut self,
        details: &CustomerDetails,
        charges: Option<&CustomerChargesDetails>,
    ) {
        self.view.render_overview(&customer_overview_text(details));
        self.view
            .render_detail(&customer_detail_text(details, charges));
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
