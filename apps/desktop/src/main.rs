use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    fetch::FetchState,
    screen::{AccountDetailsScreen, CustomerDetailsScreen, ScreenView},
    AccountService, CustomerService,
};
use shared::domain::{AccountIdentity, AccountKind, CustomerIdentity, CustomerKind};
use tokio::runtime::Handle;
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: String,
    #[command(subcommand)]
    subject: Subject,
}

#[derive(Subcommand, Debug)]
enum Subject {
    /// Show detail regions for one customer.
    Customer {
        #[arg(long)]
        number: String,
        #[arg(long, value_enum)]
        kind: CustomerKindArg,
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Show detail regions for one account.
    Account {
        #[arg(long)]
        number: String,
        #[arg(long, value_enum)]
        kind: AccountKindArg,
    },
    /// List the signed-in loan officer's customers.
    Portfolio,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CustomerKindArg {
    Client,
    Group,
    Center,
}

impl From<CustomerKindArg> for CustomerKind {
    fn from(value: CustomerKindArg) -> Self {
        match value {
            CustomerKindArg::Client => CustomerKind::Client,
            CustomerKindArg::Group => CustomerKind::Group,
            CustomerKindArg::Center => CustomerKind::Center,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AccountKindArg {
    Savings,
    Loan,
}

impl From<AccountKindArg> for AccountKind {
    fn from(value: AccountKindArg) -> Self {
        match value {
            AccountKindArg::Savings => AccountKind::Savings,
            AccountKindArg::Loan => AccountKind::Loan,
        }
    }
}

#[derive(Default)]
struct TerminalView;

impl ScreenView for TerminalView {
    fn render_overview(&mut self, text: &str) {
        println!("== Overview ==");
        print!("{text}");
    }

    fn render_detail(&mut self, text: &str) {
        println!("== Details ==");
        print!("{text}");
    }

    fn set_deposit_due_visible(&mut self, visible: bool) {
        if visible {
            println!("[view deposit due details]");
        }
    }

    fn show_progress(&mut self, title: &str, message: &str) {
        println!("{title}: {message}");
    }

    fn hide_progress(&mut self) {}

    fn show_message(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Pumps screen events on this (UI-owning) task until the fetch episode
/// leaves `Running`, then drains whatever the episode delivered.
macro_rules! drive_screen {
    ($screen:expr) => {{
        $screen.on_session_active();
        let deadline = Instant::now() + Duration::from_secs(30);
        while $screen.fetch_state() == Some(FetchState::Running) && Instant::now() < deadline {
            $screen.pump_events();
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        $screen.pump_events();
        $screen.on_destroy();
    }};
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    match args.subject {
        Subject::Customer { number, kind, name } => {
            info!(%number, ?kind, "opening customer details screen");
            let service = Arc::new(CustomerService::new(args.server_url));
            let mut screen = CustomerDetailsScreen::new(
                CustomerIdentity::new(number, kind.into(), name),
                service,
                Handle::current(),
                TerminalView,
            );
            drive_screen!(screen);
        }
        Subject::Account { number, kind } => {
            info!(%number, ?kind, "opening account details screen");
            let service = Arc::new(AccountService::new(args.server_url));
            let mut screen = AccountDetailsScreen::new(
                AccountIdentity::new(number, kind.into()),
                service,
                Handle::current(),
                TerminalView,
            );
            drive_screen!(screen);
        }
        Subject::Portfolio => {
            info!("listing loan officer portfolio");
            let service = CustomerService::new(args.server_url);
            let portfolio = service.loan_officer_customers().await?;
            for customer in portfolio.customers {
                println!(
                    "{} {} ({:?})",
                    customer.global_cust_num, customer.display_name, customer.kind
                );
            }
        }
    }

    Ok(())
}
