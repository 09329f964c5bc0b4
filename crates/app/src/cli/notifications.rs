use clap::{Args, Subcommand};
use shopfront::notifications::{StoredNotification, sort_by_arrival};
use shopfront_app::context::AppContext;
use tokio::signal;

use crate::cli::describe;

#[derive(Debug, Args)]
pub(crate) struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationsSubcommand {
    /// Print the feed once
    List,

    /// Print the feed whenever it changes, until interrupted
    Watch,
}

pub(crate) async fn run(command: NotificationsCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        NotificationsSubcommand::List => {
            let mut notifications = context
                .events
                .list()
                .await
                .map_err(|error| format!("failed to list notifications: {}", describe(&error)))?;

            sort_by_arrival(&mut notifications);

            print_feed(&notifications);

            Ok(())
        }
        NotificationsSubcommand::Watch => {
            let mut subscription = context.feed().subscribe(context.feed_interval);

            let interrupted = signal::ctrl_c();
            tokio::pin!(interrupted);

            loop {
                tokio::select! {
                    snapshot = subscription.next() => match snapshot {
                        Some(notifications) => print_feed(&notifications),
                        None => break,
                    },
                    _ = &mut interrupted => break,
                }
            }

            subscription.unsubscribe();

            Ok(())
        }
    }
}

fn print_feed(notifications: &[StoredNotification]) {
    if notifications.is_empty() {
        println!("no notifications");
        return;
    }

    for stored in notifications {
        let notification = &stored.notification;

        println!("{} [{}]", notification.title, stored.id);
        println!("{}", notification.subtitle);
        println!("{}", notification.detail);
        println!("{}", notification.date);
        println!();
    }
}
