//! The owning event loop: console input, completion outcomes, interrupts.
//!
//! Everything that touches the controller runs here. Completion workers
//! only ever talk back through the outcome channel.

use std::future::Future;

use parlor_ai::session::IgnoreReason;
use parlor_ai::{CompletionOutcome, SessionController, SessionError, Submission};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::commands::{parse_line, Command, HELP_TEXT};

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run until `/quit`, end of input, or `interrupt` resolves, then shut the
/// session down.
///
/// At end of input an outstanding reply is awaited first, so piped input
/// gets its answers. `/quit` and interrupts do not wait.
pub async fn run<R, I>(
    mut controller: SessionController,
    mut outcomes: UnboundedReceiver<CompletionOutcome>,
    input: R,
    interrupt: I,
) -> Result<SessionController, SessionError>
where
    R: AsyncBufRead + Unpin,
    I: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut input_open = true;
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            Some(outcome) = outcomes.recv() => {
                controller.handle_outcome(outcome);
            }
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) => {
                    if handle_line(&mut controller, &line)? == Flow::Quit {
                        info!("quit requested");
                        break;
                    }
                }
                Ok(None) => {
                    debug!("end of input");
                    input_open = false;
                }
                Err(e) => {
                    warn!("failed to read input: {e}");
                    input_open = false;
                }
            },
            _ = &mut interrupt => {
                info!("interrupted");
                break;
            }
        }

        if !input_open && !controller.is_processing() {
            break;
        }
    }

    controller.shutdown()?;
    Ok(controller)
}

fn handle_line(controller: &mut SessionController, line: &str) -> Result<Flow, SessionError> {
    match parse_line(line) {
        Command::Say(text) => report(controller.submit(&text)?),
        Command::Continue => report(controller.submit_continuation()?),
        Command::Clear => ignore_busy(controller.reset())?,
        Command::Resume => resume(controller)?,
        Command::Help => println!("{HELP_TEXT}"),
        Command::Quit => return Ok(Flow::Quit),
        Command::Unknown(name) => println!("Unknown command: /{name} (try /help)"),
    }
    Ok(Flow::Continue)
}

fn report(submission: Submission) {
    match submission {
        Submission::Dispatched(request_id) => debug!(request_id, "request dispatched"),
        Submission::Ignored(IgnoreReason::Busy) => {
            println!("Still waiting for the previous reply; input ignored.")
        }
        Submission::Ignored(IgnoreReason::Empty) => {}
    }
}

/// Busy rejections are already shown to the user by the controller.
fn ignore_busy(result: Result<(), SessionError>) -> Result<(), SessionError> {
    match result {
        Err(SessionError::Busy) => Ok(()),
        other => other,
    }
}

/// Load the latest-session snapshot into the controller.
pub fn resume(controller: &mut SessionController) -> Result<(), SessionError> {
    match controller.writer().read_latest_session() {
        Ok(Some(messages)) => ignore_busy(controller.restore(messages)),
        Ok(None) => {
            println!("No saved session to resume.");
            Ok(())
        }
        Err(e) => {
            warn!("failed to read latest session: {e}");
            println!("Could not read the latest session: {e}");
            Ok(())
        }
    }
}
