//! Interactive shell hosting the translator and breakdown views.
//!
//! The shell routes each input line to the active view and answers with the
//! re-rendered view. Requests are awaited inline, so a view is never asked to
//! start a second request while one is in flight.

mod command;
pub mod render;

pub use command::{Command, Route};

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::mt::{PhraseLookup, TranslationClient};
use crate::view::{PhraseBreakdownView, TranslatorView};

/// What the caller should do after a line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Render(String),
    Quit,
}

pub struct Shell {
    route: Route,
    translator: TranslatorView,
    breakdown: PhraseBreakdownView,
    translation: TranslationClient,
    lookup: Arc<dyn PhraseLookup>,
}

impl Shell {
    pub fn new(translation: TranslationClient, lookup: Arc<dyn PhraseLookup>) -> Self {
        Self {
            route: Route::default(),
            translator: TranslatorView::default(),
            breakdown: PhraseBreakdownView::new(),
            translation,
            lookup,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn translator(&self) -> &TranslatorView {
        &self.translator
    }

    pub fn breakdown(&self) -> &PhraseBreakdownView {
        &self.breakdown
    }

    /// Render the active view
    pub fn render(&self) -> String {
        match self.route {
            Route::Translator => render::render_translator(&self.translator),
            Route::Breakdown => render::render_breakdown(&self.breakdown),
        }
    }

    pub fn prompt(&self) -> String {
        match self.route {
            Route::Translator => format!(
                "[{}→{}] > ",
                self.translator.source().code(),
                self.translator.target().code()
            ),
            Route::Breakdown => "[breakdown] > ".to_string(),
        }
    }

    /// Handle one line of input
    pub async fn handle_line(&mut self, line: &str) -> ShellAction {
        let command = Command::parse(line);
        debug!(route = self.route.name(), ?command, "handling command");

        match command {
            Command::Quit => return ShellAction::Quit,
            Command::Nothing => return ShellAction::Render(String::new()),
            Command::Help => return ShellAction::Render(format!("{}\n", render::HELP)),
            Command::Invalid(message) => return ShellAction::Render(format!("{}\n", message)),
            Command::History => {
                return ShellAction::Render(render::render_history(self.translator.history()));
            }
            Command::Navigate(route) => self.route = route,
            Command::Swap => {
                if self.route != Route::Translator {
                    return ShellAction::Render(":swap only works on the translator\n".to_string());
                }
                self.translator.swap();
            }
            Command::SetSource(language) => self.translator.set_source(language),
            Command::SetTarget(language) => self.translator.set_target(language),
            Command::Submit(text) => match self.route {
                Route::Translator => {
                    self.translator.set_input(text);
                    if let Err(rejected) = self.translator.translate(&self.translation).await {
                        return ShellAction::Render(format!("{}\n", rejected));
                    }
                }
                Route::Breakdown => {
                    self.breakdown.set_phrase(text);
                    if let Err(rejected) = self.breakdown.lookup(self.lookup.as_ref()).await {
                        return ShellAction::Render(format!("{}\n", rejected));
                    }
                }
            },
        }

        ShellAction::Render(self.render())
    }

    /// Read lines from `input` until EOF or `:quit`, writing prompts and views to `output`
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output
            .write_all(format!("{}\n{}", render::HELP, self.render()).as_bytes())
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(self.prompt().as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await {
                ShellAction::Render(text) => output.write_all(text.as_bytes()).await?,
                ShellAction::Quit => break,
            }
        }

        output.write_all(b"\n").await?;
        output.flush().await
    }
}
