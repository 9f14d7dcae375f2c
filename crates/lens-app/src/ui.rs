use kanal::AsyncReceiver;
use lens_config::ui::UiConfig;
use lens_types::{AppEvent, DisplayUpdate};
use tokio_util::sync::CancellationToken;

/// Plain-text stand-in for the floating translation window
pub struct ConsoleRenderer {
    max_lines: usize,
}

impl ConsoleRenderer {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            max_lines: config.max_text_lines.max(1) as usize,
        }
    }

    fn clip(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() <= self.max_lines {
            return lines.join("\n");
        }
        let mut kept = lines[..self.max_lines].join("\n");
        kept.push_str(" …");
        kept
    }

    pub fn render(&self, update: &DisplayUpdate) -> String {
        let mut out = Vec::new();
        if let Some(original) = &update.original {
            out.push(format!("[original]\n{}", self.clip(original)));
        }
        if let Some(error) = &update.error {
            out.push(format!("[error] {error}"));
        }
        match &update.translation {
            Some(translation) => out.push(self.clip(translation)),
            None if out.is_empty() => out.push("(waiting for text)".to_string()),
            None => {}
        }
        out.join("\n")
    }
}

async fn copy_to_clipboard(text: String) {
    let chars = text.chars().count();
    match tokio::task::spawn_blocking(move || lens_io::copy_text(&text)).await {
        Ok(Ok(())) => {
            tracing::info!("Copied {} chars to clipboard", chars);
            println!("(copied)");
        }
        Ok(Err(e)) => tracing::warn!("Clipboard unavailable: {}", e),
        Err(e) => tracing::error!("Clipboard task failed: {}", e),
    }
}

/// Print display updates and status lines until shutdown
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let renderer = ConsoleRenderer::new(&config);
    println!("{}", lens_io::USAGE);

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        match event {
            AppEvent::Display(update) => println!("{}\n", renderer.render(&update)),
            AppEvent::Status {
                message,
                monitoring,
            } => {
                let state = if monitoring { "on" } else { "off" };
                println!("-- {message} (monitoring {state})");
            }
            AppEvent::CopyText(text) => copy_to_clipboard(text).await,
            AppEvent::Shutdown => {
                tracing::info!("[UI] Shutdown requested");
                break;
            }
            AppEvent::Command(command) => {
                tracing::trace!("[UI] Ignoring command on display channel: {:?}", command);
            }
        }
    }
    Ok(())
}
