//! Keeps log output off the terminal while the form owns it.
//!
//! `main` wraps its stderr writer with [`gated`]. [`run_form_tui`] holds a
//! [`TerminalLogPause`] for as long as the alternate screen is up, so events
//! emitted by submits and artifact loading never land on top of the frame.
//!
//! [`run_form_tui`]: super::run_form_tui

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Metadata;
use tracing_subscriber::fmt::writer::{MakeWriter, MakeWriterExt};

static PAUSED: AtomicBool = AtomicBool::new(false);

/// Wrap a writer so that it drops events while terminal logs are paused.
pub fn gated<M>(make_writer: M) -> impl for<'a> MakeWriter<'a> + 'static
where
    M: for<'a> MakeWriter<'a> + 'static,
{
    make_writer.with_filter(|_: &Metadata<'_>| !PAUSED.load(Ordering::Relaxed))
}

/// Whether gated writers are currently dropping events.
#[must_use]
pub fn terminal_logs_paused() -> bool {
    PAUSED.load(Ordering::Relaxed)
}

/// Pauses gated writers until dropped.
#[must_use = "logs resume as soon as the pause is dropped"]
pub struct TerminalLogPause {
    _private: (),
}

pub fn pause_terminal_logs() -> TerminalLogPause {
    PAUSED.store(true, Ordering::Relaxed);
    TerminalLogPause { _private: () }
}

impl Drop for TerminalLogPause {
    fn drop(&mut self) {
        PAUSED.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::app;
    use crate::tui::FocusPanel;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_submit_writes_nothing_while_paused() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_ansi(false)
            .with_writer(gated(captured.clone()))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut app = app(&[]);
            app.focus = FocusPanel::Ingredients;
            app.activate();

            {
                let _pause = pause_terminal_logs();
                assert!(terminal_logs_paused());
                app.submit();
                assert!(app.last_prediction.is_some());
            }
            assert_eq!(captured.text(), "");

            app.submit();
        });

        assert!(!terminal_logs_paused());
        assert!(captured.text().contains("predicted rating"));
    }
}
