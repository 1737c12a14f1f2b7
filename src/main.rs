use std::sync::Arc;
use std::time;

use agent_notifier::app::{CommandService, log_notifications, spawn_stdin_reader};
use agent_notifier::cli::Command;
use agent_notifier::client::{NotificationClient, WebSocket};
use agent_notifier::config::{Configuration, init_logger, verbose};
use agent_notifier::render::{Console, Desktop};
use eyre::{Context, Result};
use tokio::task;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    Configuration::init(config.clone())?;

    init_logger(&config.log)?;
    verbose!("[+] Logger initialized");

    let renderer = Arc::new(Console::stdout(config.notifier.bell));
    let mut client = NotificationClient::new(
        &config.server,
        config.notifier.clone(),
        Arc::new(WebSocket),
        renderer,
    )
    .wrap_err("creating notification client")?;
    if config.notifier.system_notifications {
        client = client.with_system_notifier(Arc::new(Desktop));
        verbose!("[+] Desktop notifications enabled");
    }
    verbose!("[+] Push channel: {}", client.url());

    let handle = client.handle();
    let mut task_set = task::JoinSet::new();

    task_set.spawn(async move {
        client.start().await;
        Ok::<(), eyre::Report>(())
    });
    task_set.spawn(log_notifications(handle.clone()));
    task_set.spawn(
        CommandService::new(
            spawn_stdin_reader(),
            handle.clone(),
            Box::new(std::io::stdout()),
        )
        .run(),
    );
    verbose!("[+] Listening for notifications, type `help` for commands");

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(err) = res {
                log::error!("Failed to listen for ctrl-c: {}", err);
            }
            log::info!("Interrupted, shutting down");
        }
        _ = handle.closed() => {}
    }
    handle.shutdown();

    let drain = async {
        while let Some(res) = task_set.join_next().await {
            match res {
                Ok(Ok(())) => {}
                Ok(Err(err)) => log::error!("Task error: {}", err),
                Err(err) if err.is_cancelled() => {}
                Err(err) => log::error!("Task error: {}", err),
            }
        }
    };
    if tokio::time::timeout(time::Duration::from_secs(5), drain)
        .await
        .is_err()
    {
        eprintln!("Shutdown timeout reached");
    }
    task_set.abort_all();

    Ok(())
}
