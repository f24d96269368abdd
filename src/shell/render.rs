//! Plain-text rendering of the views.

use std::fmt::Write;
use std::time::Duration;

use crate::view::{History, LookupState, PhraseBreakdownView, TranslatorView};

pub const HELP: &str = "\
Type text and press Enter to translate it (or look it up on the breakdown screen).

Commands:
  :t, :translate    show the translator
  :b, :breakdown    show the Korean phrase breakdown
  :s, :swap         swap languages and text
  :from <lang>      set the source language (en, ko)
  :to <lang>        set the target language (en, ko)
  :h, :history      list this session's translations
  :?, :help         show this help
  :q, :quit         exit";

fn request_took(duration: Duration) -> String {
    format!("Request took {:.1}ms", duration.as_secs_f64() * 1000.0)
}

pub fn render_translator(view: &TranslatorView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} → {}", view.source(), view.target());

    if view.is_loading() {
        out.push_str("Translating...\n");
        return out;
    }
    if view.output().is_empty() {
        let _ = writeln!(out, "Enter text in {}", view.source());
        return out;
    }

    let _ = writeln!(
        out,
        "From: {}  To: {}",
        view.source().code().to_uppercase(),
        view.target().code().to_uppercase()
    );
    for line in view.output().lines() {
        let _ = writeln!(out, "  {}", line);
    }
    if let Some(reason) = view.degraded_reason() {
        let _ = writeln!(out, "(placeholder, translation unavailable: {})", reason);
    }
    if let Some(duration) = view.last_duration() {
        let _ = writeln!(out, "{}", request_took(duration));
    }
    out
}

pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "No translations yet.\n".to_string();
    }

    let mut out = String::from("Translation History\n");
    for (i, entry) in history.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. [{}] {} → {}{}",
            i + 1,
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.source.code().to_uppercase(),
            entry.target.code().to_uppercase(),
            if entry.is_degraded() { " (placeholder)" } else { "" }
        );
        let _ = writeln!(out, "     {}", entry.original);
        for line in entry.translated.lines() {
            let _ = writeln!(out, "     ⇒ {}", line);
        }
    }
    out
}

pub fn render_breakdown(view: &PhraseBreakdownView) -> String {
    let mut out = String::from("Korean Breakdown\n");

    match view.state() {
        LookupState::AwaitingResponse => {
            out.push_str("Looking up...\n");
            return out;
        }
        LookupState::Error(message) => {
            let _ = writeln!(out, "{}", message);
            return out;
        }
        LookupState::Idle => {}
    }

    let Some(analysis) = view.analysis() else {
        out.push_str("Enter a Korean phrase...\n");
        return out;
    };

    out.push_str("\nPhrase Details\n");
    let _ = writeln!(out, "  Phrase: {}", analysis.phrase);
    let _ = writeln!(out, "  Pronunciation: {}", analysis.pronunciation);
    let _ = writeln!(out, "  Origin: {}", analysis.origin);

    out.push_str("\nExample Usage\n");
    let _ = writeln!(out, "  {}", analysis.example);

    out.push_str("\nCultural Context\n");
    let _ = writeln!(out, "  {}", analysis.context);

    out.push_str("\nFormality Level\n");
    let _ = writeln!(out, "  Level: {}", analysis.formality.level);
    if !analysis.formality.alternatives.is_empty() {
        out.push_str("  Alternative Forms:\n");
        for alternative in &analysis.formality.alternatives {
            let _ = writeln!(out, "    • {}", alternative);
        }
    }

    if let Some(duration) = view.last_duration() {
        let _ = writeln!(out, "\n{}", request_took(duration));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::error::MtError;
    use crate::mt::phrase::sample_analysis;
    use crate::mt::translator::Translation;

    #[test]
    fn test_request_took_format() {
        assert_eq!(request_took(Duration::from_micros(12_345)), "Request took 12.3ms");
    }

    #[test]
    fn test_translator_empty_prompt() {
        let rendered = render_translator(&TranslatorView::default());
        assert!(rendered.starts_with("English → Korean"));
        assert!(rendered.contains("Enter text in English"));
    }

    #[test]
    fn test_translator_output_lines_and_timing() {
        let mut view = TranslatorView::default();
        view.set_input("Hello\nBye");
        let ticket = view.begin_translate().unwrap();
        assert!(render_translator(&view).contains("Translating..."));

        view.complete(ticket, Ok(Translation::Translated("안녕\n잘 가".to_string())));
        let rendered = render_translator(&view);

        assert!(rendered.contains("From: EN  To: KO"));
        assert!(rendered.contains("  안녕\n  잘 가\n"));
        assert!(rendered.contains("Request took"));
        assert!(!rendered.contains("placeholder"));
    }

    #[test]
    fn test_translator_marks_degraded_output() {
        let mut view = TranslatorView::default();
        view.set_input("Hello");
        let ticket = view.begin_translate().unwrap();
        view.complete(
            ticket,
            Ok(Translation::Degraded {
                text: "[ko] olleH".to_string(),
                reason: "Network error: refused".to_string(),
            }),
        );

        let rendered = render_translator(&view);
        assert!(rendered.contains("[ko] olleH"));
        assert!(rendered.contains("placeholder, translation unavailable: Network error: refused"));
    }

    #[test]
    fn test_history_listing() {
        let mut view = TranslatorView::default();
        assert_eq!(render_history(view.history()), "No translations yet.\n");

        view.set_input("Hello");
        let ticket = view.begin_translate().unwrap();
        view.complete(ticket, Ok(Translation::Translated("안녕".to_string())));

        let rendered = render_history(view.history());
        assert!(rendered.contains("  1. ["));
        assert!(rendered.contains("EN → KO"));
        assert!(rendered.contains("     Hello\n"));
        assert!(rendered.contains("⇒ 안녕"));
    }

    #[test]
    fn test_breakdown_renders_every_field() {
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");
        let ticket = view.begin_lookup().unwrap();
        view.complete(ticket, Ok(sample_analysis()));

        let rendered = render_breakdown(&view);
        let analysis = sample_analysis();
        for field in [
            &analysis.phrase,
            &analysis.pronunciation,
            &analysis.origin,
            &analysis.example,
            &analysis.context,
            &analysis.formality.level,
        ] {
            assert!(rendered.contains(field.as_str()), "missing {}", field);
        }
        assert_eq!(rendered.matches("    • ").count(), analysis.formality.alternatives.len());
        assert!(rendered.contains("    • 고마워요\n    • 고마워\n"));
        assert!(rendered.contains("Request took"));
    }

    #[test]
    fn test_breakdown_omits_empty_alternatives() {
        let mut analysis = sample_analysis();
        analysis.formality.alternatives.clear();
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");
        let ticket = view.begin_lookup().unwrap();
        view.complete(ticket, Ok(analysis));

        assert!(!render_breakdown(&view).contains("Alternative Forms"));
    }

    #[test]
    fn test_breakdown_error_and_loading() {
        let mut view = PhraseBreakdownView::new();
        view.set_phrase("감사합니다");
        let ticket = view.begin_lookup().unwrap();
        assert!(render_breakdown(&view).contains("Looking up..."));

        view.complete(ticket, Err(MtError::DecodeError("bad analysis".to_string())));
        let rendered = render_breakdown(&view);
        assert!(rendered.contains("Failed to fetch phrase analysis: Decode error: bad analysis"));
        assert!(!rendered.contains("Phrase Details"));
    }
}
