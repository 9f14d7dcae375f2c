use kanal::{AsyncReceiver, AsyncSender};
use lens_config::Config;
use lens_core::{Completed, Session, WorkerExecutor, WorkerHandle, interactive_loop, worker_loop};
use lens_types::AppEvent;
use tokio::io::BufReader;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub completed: (AsyncSender<Completed>, AsyncReceiver<Completed>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(64),
            // One attempt in flight, so one outcome at a time
            completed: kanal::bounded_async(4),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            channels: ChannelSet::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn worker, interactive loop and renderer; any of them finishing
    /// ends the session
    pub fn spawn_tasks(&self, config: &Config, executor: WorkerExecutor) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let (worker, requests) = WorkerHandle::channel();

        // Worker
        tasks.spawn(worker_loop(
            executor,
            requests,
            self.channels.completed.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Interactive loop
        tasks.spawn(interactive_loop(
            Session::from_config(config),
            self.channels.ui_to_app.1.clone(),
            self.channels.completed.1.clone(),
            worker,
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Renderer
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            config.ui.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Stdin command reader. Kept out of the join set: it ends on `quit`
    /// before the interactive loop has drained.
    pub fn spawn_command_reader(&self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(lens_io::read_commands(
            BufReader::new(tokio::io::stdin()),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ))
    }

    /// Run until Ctrl+C or the first task ends, then stop the rest
    pub async fn run(&self, mut tasks: JoinSet<anyhow::Result<()>>) -> anyhow::Result<()> {
        let reader = self.spawn_command_reader();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
            }
            Some(result) = tasks.join_next() => {
                log_task_exit(result);
            }
        }

        self.shutdown();
        while let Some(result) = tasks.join_next().await {
            log_task_exit(result);
        }
        reader.abort();
        Ok(())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

fn log_task_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("Task finished"),
        Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
        Err(e) => tracing::error!("Task panicked: {}", e),
    }
}
