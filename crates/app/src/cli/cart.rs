use clap::{Args, Subcommand};
use shopfront::{
    cart::{Cart, CartLineId},
    prices::format_price,
};
use shopfront_app::{
    carts::{ClearOutcome, Removal},
    context::AppContext,
    prompt::Confirm,
};

use crate::cli::{describe, table};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show every cart line
    List,

    /// Remove one cart line
    Remove {
        /// Cart line id
        id: CartLineId,
    },

    /// Remove every cart line
    Clear,
}

pub(crate) async fn run(
    command: CartCommand,
    context: &AppContext,
    confirm: &dyn Confirm,
) -> Result<(), String> {
    let mut session = context.cart_session();

    session.load().await;

    match command.command {
        CartSubcommand::List => {
            if session.cart().is_empty() {
                println!("cart is empty");
                return Ok(());
            }

            println!("{}", render(session.cart()));

            Ok(())
        }
        CartSubcommand::Remove { id } => {
            match session
                .remove_line(&id, confirm)
                .await
                .map_err(|error| format!("failed to remove cart line: {}", describe(&error)))?
            {
                Removal::Cancelled => println!("cancelled"),
                Removal::Removed(line) => println!("removed {} ({})", line.name, line.id),
            }

            Ok(())
        }
        CartSubcommand::Clear => {
            match session.clear_all(confirm).await {
                ClearOutcome::Cancelled => println!("cancelled"),
                ClearOutcome::Cleared(outcome) => {
                    println!("removed {} cart lines", outcome.succeeded.len());

                    for (line, error) in &outcome.failed {
                        println!("could not remove {} ({}): {}", line.name, line.id, describe(error));
                    }
                }
            }

            Ok(())
        }
    }
}

pub(crate) fn render(cart: &Cart) -> String {
    table::render(
        ["ID", "Product", "Category", "Price", "Qty", "Total", "Selected"],
        cart.lines().iter().map(|line| {
            [
                line.id.to_string(),
                line.name.clone(),
                line.category.clone(),
                format_price(&line.price),
                line.quantity.get().to_string(),
                line.line_total()
                    .map_or_else(|error| error.to_string(), |total| format_price(&total)),
                if line.checked { "x" } else { "" }.to_string(),
            ]
        }),
        3..6,
    )
}
