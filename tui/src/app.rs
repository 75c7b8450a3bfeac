//! Terminal session and event loop for the banner demo.
//!
//! The animation task owns the pacing; this module owns the terminal. A
//! single `tokio::select!` loop interleaves the driver's frame channel with
//! the crossterm event stream: frames repaint the banner line, quit keys
//! stop the driver, and resize events trigger a repaint gated behind a
//! [`Throttle`] so a drag-resize storm cannot flood the terminal.

use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Result;
use crossterm::cursor::Hide;
use crossterm::cursor::MoveToColumn;
use crossterm::cursor::Show;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::terminal::Clear;
use crossterm::terminal::ClearType;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use teletype_core::Frame;
use teletype_core::Typewriter;
use teletype_core::driver;
use teletype_utils_throttle::Throttle;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::debug;
use tracing::warn;

/// Resize events arrive in bursts while the user drags the window; one
/// repaint per interval is plenty.
const RESIZE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Raw-mode session that restores the terminal on drop, including on the
/// error paths out of [`run`].
struct TerminalSession;

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(std::io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), Show);
        let _ = disable_raw_mode();
    }
}

/// Animate `typewriter` on the current line until a quit key arrives.
pub async fn run(typewriter: Typewriter) -> Result<()> {
    let _session = TerminalSession::enter()?;
    let mut stdout = std::io::stdout();

    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();
    let handle = driver::spawn(typewriter, frame_tx);

    let mut events = EventStream::new();
    let mut resize_repaint = Throttle::new(RESIZE_REPAINT_INTERVAL);
    let mut last_frame: Option<Frame> = None;

    loop {
        tokio::select! {
            frame = frame_rx.recv() => {
                let Some(frame) = frame else {
                    debug!("frame channel closed; leaving event loop");
                    break;
                };
                paint(&mut stdout, &frame.text)?;
                last_frame = Some(frame);
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if is_quit_key(key) => {
                        debug!("quit key received");
                        handle.stop();
                        break;
                    }
                    Some(Ok(Event::Resize(cols, rows))) => {
                        if resize_repaint.admit(Instant::now())
                            && let Some(frame) = &last_frame
                        {
                            debug!(cols, rows, "repainting after resize");
                            paint(&mut stdout, &frame.text)?;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!("terminal event stream error: {err}");
                        handle.stop();
                        break;
                    }
                    None => {
                        handle.stop();
                        break;
                    }
                }
            }
        }
    }

    // Leave the last frame on its own line rather than under the cursor.
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Repaint the banner line in place.
fn paint(out: &mut impl Write, text: &str) -> Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn is_quit_key(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
