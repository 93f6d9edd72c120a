//! # Document processing
//!
//! Drives a [`PreprocessingChain`] over whole documents, one term at a
//! time, and over batches of documents in parallel. The execution host
//! hands in rows (documents), a [`RunContext`] carrying the cancellation
//! signal and the warning sink, and receives transformed rows or typed
//! per-row failures back.
//!
//! ## Guarantees
//!
//! - Within every sentence, output term order equals input order minus
//!   dropped terms; no transformation reorders words inside a term.
//! - Cancellation is checked between terms, never mid-term. Output
//!   produced before the signal stays intact; partial results are valid.
//! - Batch processing shares only read-only state (the chain, the tag
//!   registry, loaded models) plus the append-only warning sink, so rows
//!   are processed independently across worker threads.
//! - A failed row is reported as a [`RowError`] naming the row and the
//!   failing step; other rows still complete. Whether that aborts the
//!   whole run is the host's decision.

use rayon::prelude::*;

use crate::error::RowError;
use crate::preprocessing::{PreprocessingChain, RunContext};
use crate::term::{Document, Sentence};

/// Applies one chain to documents. The processor itself is stateless
/// across rows and safe to share across threads.
pub struct DocumentProcessor {
    chain: PreprocessingChain,
}

impl DocumentProcessor {
    pub fn new(chain: PreprocessingChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &PreprocessingChain {
        &self.chain
    }

    /// Processes a single document as row 0.
    pub fn process_document(
        &self,
        document: &Document,
        ctx: &RunContext,
    ) -> Result<Document, RowError> {
        self.process_row(0, document, ctx)
    }

    /// Processes one document under an explicit row index, used in error
    /// reports. Sentences left without any term are dropped from the
    /// output.
    pub fn process_row(
        &self,
        row: usize,
        document: &Document,
        ctx: &RunContext,
    ) -> Result<Document, RowError> {
        let mut sentences = Vec::with_capacity(document.sentences().len());
        for sentence in document.sentences() {
            if ctx.is_cancelled() {
                break;
            }
            let mut terms = Vec::with_capacity(sentence.terms().len());
            for term in sentence.terms() {
                if ctx.is_cancelled() {
                    break;
                }
                match self.chain.apply(term.clone(), ctx) {
                    Ok(Some(processed)) => terms.push(processed),
                    Ok(None) => {}
                    Err(source) => return Err(RowError { row, source }),
                }
            }
            if !terms.is_empty() {
                sentences.push(Sentence::new(terms));
            }
        }
        Ok(Document::new(document.metadata().clone(), sentences))
    }

    /// Processes a batch of rows in parallel. Row indices in the result
    /// (and in any [`RowError`]) correspond to positions in `documents`.
    pub fn process_documents(
        &self,
        documents: &[Document],
        ctx: &RunContext,
    ) -> Vec<Result<Document, RowError>> {
        documents
            .par_iter()
            .enumerate()
            .map(|(row, document)| self.process_row(row, document, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case_converter::{CaseConverter, CaseMode};
    use crate::lemmatizer::{Lemmatizer, MissingTagPolicy};
    use crate::punctuation_erasure::PunctuationErasure;
    use crate::stopword_filter::StopWordFilter;
    use crate::term::{Term, Word};

    fn doc(sentences: &[&[&str]]) -> Document {
        Document::from_sentences(
            sentences
                .iter()
                .map(|terms| {
                    Sentence::new(terms.iter().map(|t| Term::from_word(*t)).collect())
                })
                .collect(),
        )
    }

    fn texts(document: &Document) -> Vec<Vec<String>> {
        document
            .sentences()
            .iter()
            .map(|s| s.terms().iter().map(Term::text).collect())
            .collect()
    }

    #[test]
    fn test_process_document_order_minus_drops() {
        let chain = PreprocessingChain::new()
            .add(CaseConverter::new(CaseMode::Lower))
            .add(PunctuationErasure::new())
            .add(StopWordFilter::builtin_english());
        let processor = DocumentProcessor::new(chain);
        let ctx = RunContext::new();

        let input = doc(&[&["The", "River", "rose", "."], &["It", "flooded", "."]]);
        let output = processor.process_document(&input, &ctx).unwrap();
        assert_eq!(
            texts(&output),
            vec![vec!["river", "rose"], vec!["flooded"]]
        );
    }

    #[test]
    fn test_empty_sentences_are_dropped() {
        let chain = PreprocessingChain::new().add(PunctuationErasure::new());
        let processor = DocumentProcessor::new(chain);
        let ctx = RunContext::new();

        let input = doc(&[&["...", "!"], &["ok"]]);
        let output = processor.process_document(&input, &ctx).unwrap();
        assert_eq!(output.sentences().len(), 1);
        assert_eq!(texts(&output), vec![vec!["ok"]]);
    }

    #[test]
    fn test_row_error_names_row_and_step() {
        let chain =
            PreprocessingChain::new().add(Lemmatizer::new(MissingTagPolicy::Fail));
        let processor = DocumentProcessor::new(chain);
        let ctx = RunContext::new();

        let batch = vec![
            Document::from_sentences(vec![Sentence::new(vec![Term::new(
                vec![Word::new("rivers")],
                vec![crate::tag::Tag::new("NNS", "POS")],
                false,
            )])]),
            doc(&[&["untagged"]]),
        ];
        let results = processor.process_documents(&batch, &ctx);
        assert!(results[0].is_ok());

        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.source.step, "lemmatizer");
    }

    #[test]
    fn test_cancellation_keeps_partial_output() {
        let chain = PreprocessingChain::new().add(CaseConverter::new(CaseMode::Upper));
        let processor = DocumentProcessor::new(chain);

        let ctx = RunContext::new();
        ctx.cancel();
        let output = processor
            .process_document(&doc(&[&["a", "b"]]), &ctx)
            .unwrap();
        // Cancelled before the first term: a valid, empty partial result.
        assert_eq!(output.term_count(), 0);
    }

    #[test]
    fn test_parallel_batch_shares_warning_sink() {
        let chain =
            PreprocessingChain::new().add(Lemmatizer::new(MissingTagPolicy::Skip));
        let processor = DocumentProcessor::new(chain);
        let ctx = RunContext::new();

        let batch: Vec<Document> = (0..8).map(|_| doc(&[&["untagged"]])).collect();
        let results = processor.process_documents(&batch, &ctx);
        assert!(results.iter().all(Result::is_ok));
        // One skip warning per row, accumulated across workers.
        assert_eq!(ctx.warnings().len(), 8);
    }
}
