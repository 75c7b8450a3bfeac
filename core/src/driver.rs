//! Async pacing for [`Typewriter`] ticks.
//!
//! [`spawn`] puts the state machine on its own tokio task and hands back a
//! [`TypewriterHandle`]; rendered frames are delivered over an unbounded
//! channel. Ticks are strictly sequential: the next tick is scheduled only
//! after the previous frame has been sent and its delay has elapsed.
//!
//! The task stops when the handle is cancelled or when the frame receiver is
//! dropped, and marks the handle stopped on the way out. This follows the
//! actor-style design from
//! [“Actors with Tokio”](https://ryhl.io/blog/actors-with-tokio/): a
//! dedicated task owning the state, with a lightweight cloneable handle.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::typewriter::Frame;
use crate::typewriter::Typewriter;

/// Cloneable handle to a running typewriter task.
///
/// Dropping the handle does not stop the animation; call
/// [`TypewriterHandle::stop`] (or drop the frame receiver) for that.
#[derive(Clone, Debug)]
pub struct TypewriterHandle {
    cancel: CancellationToken,
}

impl TypewriterHandle {
    /// Stop the animation. Idempotent. Takes effect before the next tick is
    /// scheduled; a frame already sent may still be in the channel.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the task has stopped (or been asked to stop).
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Completes once the task has stopped, for any reason.
    pub async fn stopped(&self) {
        self.cancel.cancelled().await;
    }
}

/// Spawn the tick loop for `typewriter` onto the current runtime.
///
/// The first frame is produced immediately; each subsequent frame follows
/// after the delay chosen by the previous tick.
pub fn spawn(typewriter: Typewriter, frame_tx: mpsc::UnboundedSender<Frame>) -> TypewriterHandle {
    let cancel = CancellationToken::new();
    let handle = TypewriterHandle {
        cancel: cancel.clone(),
    };
    tokio::spawn(run(typewriter, frame_tx, cancel));
    handle
}

async fn run(
    mut typewriter: Typewriter,
    frame_tx: mpsc::UnboundedSender<Frame>,
    cancel: CancellationToken,
) {
    loop {
        let frame = typewriter.tick();
        let delay = frame.delay;
        if frame_tx.send(frame).is_err() {
            debug!("frame receiver dropped; stopping typewriter task");
            break;
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("typewriter task cancelled");
                break;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
    // Make task exit observable through the handle whichever way we left.
    cancel.cancel();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio_util::time::FutureExt;

    use super::*;
    use crate::typewriter::TypewriterConfig;

    fn bare_config() -> TypewriterConfig {
        TypewriterConfig {
            prefix: String::new(),
            cursor: String::new(),
            ..Default::default()
        }
    }

    fn spawn_hi() -> (TypewriterHandle, mpsc::UnboundedReceiver<Frame>) {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let typewriter = Typewriter::new(vec!["Hi".to_string()], bare_config())
            .expect("non-empty message list");
        (spawn(typewriter, frame_tx), frame_rx)
    }

    async fn recv_text(frame_rx: &mut mpsc::UnboundedReceiver<Frame>) -> String {
        frame_rx
            .recv()
            .timeout(Duration::from_secs(10))
            .await
            .expect("timed out waiting for frame")
            .expect("frame channel closed unexpectedly")
            .text
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn first_frame_arrives_without_waiting_a_full_delay() {
        let (_handle, mut frame_rx) = spawn_hi();

        let first = recv_text(&mut frame_rx).await;
        assert_eq!(first, "");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn frames_follow_the_scheduled_delays() {
        let (_handle, mut frame_rx) = spawn_hi();

        assert_eq!(recv_text(&mut frame_rx).await, "");

        // Less than the reveal delay: no frame yet.
        let early = frame_rx.recv().timeout(Duration::from_millis(50)).await;
        assert!(early.is_err(), "frame arrived before its reveal delay");

        assert_eq!(recv_text(&mut frame_rx).await, "H");
        assert_eq!(recv_text(&mut frame_rx).await, "Hi");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn hold_pause_defers_the_next_frame() {
        let (_handle, mut frame_rx) = spawn_hi();

        // "", "H", then the hold frame "Hi" scheduled with the 1500ms pause.
        assert_eq!(recv_text(&mut frame_rx).await, "");
        assert_eq!(recv_text(&mut frame_rx).await, "H");
        assert_eq!(recv_text(&mut frame_rx).await, "Hi");

        let during_hold = frame_rx.recv().timeout(Duration::from_millis(1400)).await;
        assert!(during_hold.is_err(), "frame arrived during the hold pause");

        // First deletion frame re-renders the full message.
        assert_eq!(recv_text(&mut frame_rx).await, "Hi");
        assert_eq!(recv_text(&mut frame_rx).await, "H");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn stop_halts_future_frames() {
        let (handle, mut frame_rx) = spawn_hi();

        assert_eq!(recv_text(&mut frame_rx).await, "");
        handle.stop();

        let next = frame_rx
            .recv()
            .timeout(Duration::from_secs(10))
            .await
            .expect("timed out waiting for channel close");
        assert_eq!(next, None, "frame arrived after stop");
        assert!(handle.is_stopped());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn dropping_the_receiver_stops_the_task() {
        let (handle, frame_rx) = spawn_hi();
        drop(frame_rx);

        handle
            .stopped()
            .timeout(Duration::from_secs(10))
            .await
            .expect("task did not stop after receiver drop");
        assert!(handle.is_stopped());
    }
}
