use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::client::SearchClient;
use crate::session::{SearchOutcome, SessionState, Ticket};
use crate::view;

pub const HELP: &str = "\
commands:
  url <text>     set the website url
  query <text>   set the search query
  search         submit (disabled while a search is running)
  open <n>       expand or collapse result n
  show           print the page again
  help           show this help
  quit           leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Url(String),
    Query(String),
    Search,
    Open(usize),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one input line. Blank lines yield `None`. Result numbers are
/// 1-based on input and 0-based in the returned command.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_lowercase().as_str() {
        "url" => Command::Url(rest.to_string()),
        "query" => Command::Query(rest.to_string()),
        "search" => Command::Search,
        "open" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Command::Open(n - 1),
            _ => Command::Invalid(format!("open expects a result number, got {rest:?}")),
        },
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command {other:?}, try `help`")),
    };
    Some(cmd)
}

pub enum Flow {
    Continue(String),
    Quit,
}

/// Line-driven session. One task owns the state; searches run on spawned
/// tasks and report back over a channel, so input is still read while a
/// request is in flight.
pub struct App {
    client: SearchClient,
    session: SessionState,
    completions_tx: mpsc::UnboundedSender<(Ticket, SearchOutcome)>,
    completions_rx: mpsc::UnboundedReceiver<(Ticket, SearchOutcome)>,
}

impl App {
    pub fn new(client: SearchClient, session: SessionState) -> App {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        App {
            client,
            session,
            completions_tx,
            completions_rx,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn handle_command(&mut self, cmd: Command) -> Flow {
        let text = match cmd {
            Command::Url(url) => {
                self.session.set_url(url);
                view::render(&self.session)
            }
            Command::Query(query) => {
                self.session.set_query(query);
                view::render(&self.session)
            }
            Command::Search => match self.session.submit() {
                Some(submission) => {
                    let client = self.client.clone();
                    let tx = self.completions_tx.clone();
                    tokio::spawn(async move {
                        let outcome = client.search(&submission.request).await;
                        // receiver is gone only when the app is shutting down
                        let _ = tx.send((submission.ticket, outcome));
                    });
                    view::render(&self.session)
                }
                None if self.session.is_loading() => "a search is already running\n".to_string(),
                None => "fill in both url and query first\n".to_string(),
            },
            Command::Open(index) => {
                if self.session.toggle_expanded(index) {
                    view::render(&self.session)
                } else {
                    format!("no result #{}\n", index + 1)
                }
            }
            Command::Show => view::render(&self.session),
            Command::Help => HELP.to_string(),
            Command::Quit => return Flow::Quit,
            Command::Invalid(msg) => format!("{msg}\n"),
        };
        Flow::Continue(text)
    }

    /// Apply a finished search and return the page to show, or `None` if the
    /// completion was stale.
    pub fn apply_completion(&mut self, ticket: Ticket, outcome: SearchOutcome) -> Option<String> {
        self.session
            .complete(ticket, outcome)
            .then(|| view::render(&self.session))
    }

    /// Wait for the next search to report back.
    pub async fn next_completion(&mut self) -> Option<(Ticket, SearchOutcome)> {
        self.completions_rx.recv().await
    }

    /// Drive the session until `quit` or end of input. At end of input a
    /// running search is still waited for so its result gets shown.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> Result<SessionState>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        output.write_all(view::render(&self.session).as_bytes()).await?;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.context("Failed to read input")? {
                        Some(line) => {
                            let Some(cmd) = parse_command(&line) else {
                                continue;
                            };
                            match self.handle_command(cmd) {
                                Flow::Continue(text) => output.write_all(text.as_bytes()).await?,
                                Flow::Quit => break,
                            }
                        }
                        None => {
                            input_open = false;
                            if !self.session.is_loading() {
                                break;
                            }
                        }
                    }
                }
                Some((ticket, outcome)) = self.completions_rx.recv() => {
                    if let Some(page) = self.apply_completion(ticket, outcome) {
                        output.write_all(page.as_bytes()).await?;
                    }
                    if !input_open && !self.session.is_loading() {
                        break;
                    }
                }
            }
            output.flush().await?;
        }

        output.flush().await?;
        Ok(self.session)
    }
}
