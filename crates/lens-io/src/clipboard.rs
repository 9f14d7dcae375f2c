use arboard::Clipboard;

/// Put `text` on the system clipboard. Blocking; call from a blocking task.
pub fn copy_text(text: &str) -> Result<(), anyhow::Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
