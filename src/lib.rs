//! English ↔ Korean translation and Korean phrase breakdown.
//!
//! The crate is split the way the application is used:
//!
//! - [`mt`] talks to translation and phrase-analysis services
//! - [`view`] holds the state of the translator and breakdown screens
//! - [`shell`] routes terminal input to the views and renders them
//! - [`config`] decides which service to talk to
//!
//! # Example
//!
//! ```ignore
//! use koen_translator::{Config, TranslatorView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Config::from_env()?.translation_client()?;
//!     let mut view = TranslatorView::default();
//!     view.set_input("Nice to meet you");
//!     view.translate(&client).await?;
//!     println!("{}", view.output());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod language;
pub mod mt;
pub mod shell;
pub mod view;

#[cfg(test)]
mod test_support;

pub use config::{Config, ProviderKind};
pub use language::{Language, UnsupportedLanguage};
pub use mt::{
    FallbackPolicy, MachineTranslator, MtError, MtResult, PhraseAnalysis, PhraseLookup,
    Translation, TranslationClient,
};
pub use shell::{Shell, ShellAction};
pub use view::{HistoryEntry, PhraseBreakdownView, TranslatorView};
