//! Line-oriented controls: one command per line, e.g. `region 10 20 300 80`.

use kanal::AsyncSender;
use lens_types::{AppEvent, CaptureRegion, OcrLanguage, UiCommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

pub const USAGE: &str = "\
commands:
  region X Y W H     select a capture region (also X,Y,W,H)
  clear              drop the region and stop
  down X Y           press the pointer (starts a drag inside the region)
  move X Y           move the pointer
  up                 release the pointer
  src CODE           recognition language (eng, chi_sim, chi_tra, jpn, kor)
  dest CODE          translation target
  auto on|off        automatic translation every tick
  now                translate once on the next tick
  original on|off    show the recognized text
  start | stop       monitoring
  copy               copy the translation
  quit";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Bad arguments for '{command}': {reason}")]
    BadArguments { command: String, reason: String },
}

fn bad(command: &str, reason: impl ToString) -> CommandParseError {
    CommandParseError::BadArguments {
        command: command.to_string(),
        reason: reason.to_string(),
    }
}

fn point(command: &str, args: &[&str]) -> Result<(i32, i32), CommandParseError> {
    let [x, y] = args else {
        return Err(bad(command, "expected X Y"));
    };
    let x = x.parse().map_err(|_| bad(command, format!("'{}' is not a number", x)))?;
    let y = y.parse().map_err(|_| bad(command, format!("'{}' is not a number", y)))?;
    Ok((x, y))
}

fn switch(command: &str, args: &[&str]) -> Result<bool, CommandParseError> {
    match args {
        ["on"] | ["true"] | ["1"] => Ok(true),
        ["off"] | ["false"] | ["0"] => Ok(false),
        _ => Err(bad(command, "expected on or off")),
    }
}

fn language(command: &str, args: &[&str]) -> Result<OcrLanguage, CommandParseError> {
    if args.is_empty() {
        return Err(bad(command, "expected a language code"));
    }
    // Display names may contain spaces ("Chinese (Traditional)")
    args.join(" ").parse().map_err(|e| bad(command, e))
}

/// Parse one line; blank lines and `#` comments yield `None`
pub fn parse_command(line: &str) -> Result<Option<UiCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match (head.as_str(), args.as_slice()) {
        ("region", _) => {
            let region: CaptureRegion = args.join(" ").parse().map_err(|e| bad(&head, e))?;
            UiCommand::SelectRegion(region)
        }
        ("clear", []) => UiCommand::ClearRegion,
        ("down", _) => {
            let (x, y) = point(&head, &args)?;
            UiCommand::PointerDown { x, y }
        }
        ("move", _) => {
            let (x, y) = point(&head, &args)?;
            UiCommand::PointerMove { x, y }
        }
        ("up", []) => UiCommand::PointerUp,
        ("src" | "source", _) => UiCommand::SetSource(language(&head, &args)?),
        ("dest" | "target", _) => UiCommand::SetDest(language(&head, &args)?),
        ("auto", _) => UiCommand::SetAutoTranslate(switch(&head, &args)?),
        ("now", []) => UiCommand::TranslateNow,
        ("original", _) => UiCommand::ShowOriginal(switch(&head, &args)?),
        ("start", []) => UiCommand::StartMonitoring,
        ("stop", []) => UiCommand::StopMonitoring,
        ("copy", []) => UiCommand::CopyTranslation,
        ("quit" | "exit", []) => UiCommand::Quit,
        (
            "clear" | "up" | "now" | "start" | "stop" | "copy" | "quit" | "exit",
            _,
        ) => return Err(bad(&head, "takes no arguments")),
        _ => return Err(CommandParseError::Unknown(head)),
    };
    Ok(Some(command))
}

/// Forward parsed commands from `reader` until EOF, `quit`, or cancellation.
/// EOF is treated as `quit`.
pub async fn read_commands<R>(
    reader: R,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("Command input closed");
            event_tx.send(AppEvent::Command(UiCommand::Quit)).await?;
            break;
        };

        match parse_command(&line) {
            Ok(Some(command)) => {
                let quit = command == UiCommand::Quit;
                event_tx.send(AppEvent::Command(command)).await?;
                if quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("{}", e);
                eprintln!("{}\n{}", e, USAGE);
            }
        }
    }
    Ok(())
}
