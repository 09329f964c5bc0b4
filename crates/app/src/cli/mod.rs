use std::error::Error;

use clap::{Parser, Subcommand};
use shopfront_app::{
    config::AppConfig,
    context::AppContext,
    observability,
    prompt::{AlwaysConfirm, Confirm},
};

mod cart;
mod catalog;
mod checkout;
mod confirm;
mod notifications;
mod orders;
mod table;

#[derive(Debug, Parser)]
#[command(name = "shopfront", about = "Shopfront cart and checkout CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Checkout(checkout::CheckoutArgs),
    Catalog(catalog::CatalogCommand),
    Orders(orders::OrdersCommand),
    Notifications(notifications::NotificationsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging).map_err(|error| describe(&error))?;

        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to initialise: {}", describe(&error)))?;

        let confirm: Box<dyn Confirm> = if self.yes {
            Box::new(AlwaysConfirm)
        } else {
            Box::new(confirm::StdinConfirm)
        };

        match self.command {
            Commands::Cart(command) => cart::run(command, &context, confirm.as_ref()).await,
            Commands::Checkout(args) => checkout::run(args, &context).await,
            Commands::Catalog(command) => {
                catalog::run(command, &context, confirm.as_ref()).await
            }
            Commands::Orders(command) => orders::run(command, &context).await,
            Commands::Notifications(command) => notifications::run(command, &context).await,
        }
    }
}

/// An error and its chain of sources on one line.
pub(crate) fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
