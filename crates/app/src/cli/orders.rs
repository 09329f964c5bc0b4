use clap::{Args, Subcommand};
use shopfront::prices::format_price;
use shopfront_app::context::AppContext;

use crate::cli::{describe, table};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List placed orders
    List,
}

pub(crate) async fn run(command: OrdersCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List => {
            let orders = context
                .items
                .list_orders()
                .await
                .map_err(|error| format!("failed to list orders: {}", describe(&error)))?;

            if orders.is_empty() {
                println!("no orders found");
                return Ok(());
            }

            println!(
                "{}",
                table::render(
                    ["ID", "Status", "Total", "Created"],
                    orders.into_iter().map(|order| {
                        [
                            order.id.into_string(),
                            order.status,
                            order.total.map_or_else(String::new, |total| format_price(&total)),
                            order
                                .created_at
                                .map_or_else(String::new, |created_at| created_at.to_string()),
                        ]
                    }),
                    2..3,
                )
            );

            Ok(())
        }
    }
}
