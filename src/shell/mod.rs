pub mod command;
pub mod render;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::warn;
use crate::execution::types::{Fill, OrderIntent};
use crate::execution::validation::OrderRejection;
use crate::monitoring::logger::CsvLogger;
use crate::session::state::Session;
use crate::session::store::{SessionError, SessionStore};
use crate::tool::launch::tool_descriptor;
use command::{Command, CommandParser};

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self { text: text.into(), quit: false }
    }
}

/// Drives one session in the store from chat-style command lines.
pub struct Shell {
    store: SessionStore,
    session_id: String,
    parser: CommandParser,
    journal: Option<CsvLogger>,
}

impl Shell {
    /// Attach to `session_id`, opening it with the default title if the
    /// store doesn't have it yet.
    pub fn new(store: SessionStore, session_id: impl Into<String>, journal: Option<CsvLogger>) -> Result<Self> {
        let session_id = session_id.into();
        store.open(&session_id, None);

        Ok(Self {
            store,
            session_id,
            parser: CommandParser::new()?,
            journal,
        })
    }

    /// Detach and hand back the final session state.
    pub fn close(self) -> Option<Session> {
        self.store.close(&self.session_id)
    }

    pub fn session(&self) -> Option<Session> {
        self.store.get(&self.session_id)
    }

    pub fn handle(&mut self, line: &str) -> Reply {
        match self.dispatch(self.parser.parse(line)) {
            Ok(reply) => reply,
            Err(e) => Reply::say(e.to_string()),
        }
    }

    fn dispatch(&self, command: Command) -> Result<Reply, SessionError> {
        let sizer = self.store.sizer();
        let reply = match command {
            Command::Order { action, side, size } => {
                self.edit(|s| {
                    s.set_action(action);
                    if let Some(side) = side {
                        s.set_side(side);
                    }
                    s.set_size(size);
                })?;
                self.submit()?
            }
            Command::SetAction(action) => self.edit(|s| s.set_action(action))?,
            Command::SetSide(side) => self.edit(|s| s.set_side(side))?,
            Command::SetSize(size) => self.edit(|s| s.set_size(sizer.slider(size)))?,
            Command::TopUp(dollars) => self.edit(|s| s.top_up(sizer, dollars))?,
            Command::Max => self.edit(|s| s.max_size(sizer))?,
            Command::Submit => self.submit()?,
            Command::Quote => self.edit(|_| ())?,
            Command::Suggest => {
                let engine = self.store.engine();
                let snap = self.store.with_session(&self.session_id, |s| s.snapshot(engine))?;
                Reply::say(render::suggestions(&snap.suggested))
            }
            Command::Tools => Reply::say(render::tools(&[tool_descriptor()])),
            Command::Time => Reply::say(render::time(Utc::now())),
            Command::Echo(text) => Reply::say(text),
            Command::Help => Reply::say(render::HELP),
            Command::Quit => Reply { text: "Bye".to_string(), quit: true },
            Command::Unknown(line) => {
                Reply::say(format!("Unrecognized '{}'. {}", line, render::HELP))
            }
        };
        Ok(reply)
    }

    /// Apply a ticket edit and quote the result.
    fn edit(&self, f: impl FnOnce(&mut Session)) -> Result<Reply, SessionError> {
        let engine = self.store.engine();
        let snap = self.store.with_session(&self.session_id, |s| {
            f(s);
            s.snapshot(engine)
        })?;
        Ok(Reply::say(render::quote(&snap)))
    }

    fn submit(&self) -> Result<Reply, SessionError> {
        let engine = self.store.engine();
        let now = Utc::now();
        let (ticket, result, snap) = self.store.with_session(&self.session_id, |s| {
            let ticket = s.ticket;
            let result = s.submit(engine, now);
            (ticket, result, s.snapshot(engine))
        })?;

        match result {
            Ok(fill) => {
                self.journal_fill(&fill);
                Ok(Reply::say(format!("{}\n{}", render::fill(&fill), render::quote(&snap))))
            }
            Err(rejection) => {
                self.journal_rejection(&ticket, &rejection, now);
                Ok(Reply::say(render::rejection(&rejection)))
            }
        }
    }

    fn journal_fill(&self, fill: &Fill) {
        if let Some(journal) = &self.journal {
            if let Err(e) = journal.log_fill(fill) {
                warn!("Failed to journal fill: {:#}", e);
            }
        }
    }

    fn journal_rejection(&self, ticket: &OrderIntent, rejection: &OrderRejection, now: DateTime<Utc>) {
        if let Some(journal) = &self.journal {
            if let Err(e) = journal.log_rejection(ticket, rejection, now) {
                warn!("Failed to journal rejection: {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::new(SessionStore::default(), "cli", None).unwrap()
    }

    #[test]
    fn test_buy_then_oversell() {
        let mut shell = shell();

        let reply = shell.handle("buy yes 50");
        assert!(reply.text.starts_with("Filled BUY YES 50.0 @ 62.0¢ for $31.00. YES now 65%. Balance $969.00"));

        let reply = shell.handle("sell yes 60");
        assert!(reply.text.starts_with("Unavailable: Insufficient position"));
        assert!((shell.session().unwrap().account.shares_yes - 50.0).abs() < 1e-12);
        assert!((shell.session().unwrap().account.cash - 969.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_size_is_unavailable() {
        let mut shell = shell();
        let reply = shell.handle("buy no 0");
        assert!(reply.text.starts_with("Unavailable: Invalid size"));
        assert!((shell.session().unwrap().market.yes_probability() - 0.62).abs() < 1e-12);
    }

    #[test]
    fn test_ticket_editing() {
        let mut shell = shell();

        shell.handle("side no");
        shell.handle("size 900");
        assert_eq!(shell.session().unwrap().ticket.size, 500.0);

        shell.handle("topup 20");
        // $20 at 38c is 52.6 shares
        assert!((shell.session().unwrap().ticket.size - 552.6).abs() < 1e-9);

        let reply = shell.handle("submit");
        assert!(reply.text.starts_with("Filled BUY NO 552.6"));
        assert!((shell.session().unwrap().account.shares_no - 552.6).abs() < 1e-9);
    }

    #[test]
    fn test_quote_mentions_state() {
        let mut shell = shell();
        let reply = shell.handle("quote");
        assert!(reply.text.contains("Will it rain in NYC tomorrow?"));
        assert!(reply.text.contains("Balance $1,000.00"));
        assert!(reply.text.contains("[BUY YES]"));
    }

    #[test]
    fn test_chat_replies() {
        let mut shell = shell();
        assert_eq!(shell.handle("echo hi there").text, "hi there");
        assert!(shell.handle("list tools").text.contains("demo_widget"));
        assert!(shell.handle("time").text.starts_with("Server time: "));
        assert!(shell.handle("dance").text.starts_with("Unrecognized 'dance'"));
        assert!(shell.handle("quit").quit);
    }

    #[test]
    fn test_attaches_to_existing_session() {
        let store = SessionStore::default();
        store.open("cli", Some("Will Google win?"));

        let mut shell = Shell::new(store, "cli", None).unwrap();
        assert!(shell.handle("quote").text.starts_with("Will Google win?"));

        shell.handle("buy no 10");
        let session = shell.close().unwrap();
        assert!((session.account.shares_no - 10.0).abs() < 1e-12);
    }
}
