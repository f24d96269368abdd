/// Translation and phrase analysis clients
///
/// Everything that talks to an external service lives here. The views only
/// see two seams: `TranslationClient` (a `MachineTranslator` plus its
/// fallback policy) and `PhraseLookup`.
///
/// # Providers
///
/// | provider          | translation | phrase lookup |
/// |-------------------|-------------|---------------|
/// | `BackendClient`   | yes         | yes           |
/// | `MyMemoryProvider`| yes         | no            |
/// | `LlmProvider`     | yes         | yes           |
/// | mocks             | yes         | yes           |
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use koen_translator::Language;
/// use koen_translator::mt::{BackendClient, PhraseLookup, TranslationClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = Arc::new(BackendClient::new("http://localhost:8000")?);
///     let translator = TranslationClient::new(backend.clone());
///
///     let hello = translator.translate("Hello", Language::English, Language::Korean).await?;
///     let analysis = backend.lookup_phrase("감사합니다").await?;
///
///     println!("{} / {}", hello.text(), analysis.formality.level);
///     Ok(())
/// }
/// ```
pub mod backend;
pub mod error;
mod http;
pub mod llm;
pub mod mock;
pub mod mymemory;
pub mod phrase;
pub mod translator;


pub use backend::BackendClient;
pub use error::{MtError, MtResult};
pub use llm::LlmProvider;
pub use mock::{MockMode, MockPhraseLookup, MockTranslator};
pub use mymemory::MyMemoryProvider;
pub use phrase::{Formality, PhraseAnalysis, PhraseLookup};
pub use translator::{FallbackPolicy, MachineTranslator, Translation, TranslationClient};
