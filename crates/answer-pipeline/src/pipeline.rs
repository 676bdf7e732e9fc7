//! The answer pipeline: classify, extract, solve, assemble, deliver.

use std::sync::Arc;

use assembler::{compose_body, render_pdf, ChunkedText, OutputArtifact, PaginatedDocument};
use extraction::{classify, ExtractedDocument, TesseractCli, TextExtractor};
use solver_core::{hash_prompt, Attachment, InboundRequest, Origin, Solver, SolverProfile};
use tracing::{debug, error, info, warn};

use crate::config::{FileReplyMode, PipelineConfig};
use crate::delivery::{Delivery, DocumentUpload, ReplyTarget};
use crate::error::PipelineError;
use crate::event::InboundEvent;
use crate::fetcher::{AttachmentFetcher, ByteSource};
use crate::reply::{document_filename, document_title, DOCUMENT_CAPTION, PROMPT_FOR_INPUT};
use crate::request_builder::{build_request, fit_content, ProfileInstructions, RequestPlan};

/// How a single run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The answer was delivered.
    Answered {
        profile: SolverProfile,
        /// Text messages sent.
        chunks_sent: usize,
        /// Page count of the delivered document, if one was sent.
        document_pages: Option<usize>,
    },
    /// Nothing to answer; the requester was asked for input.
    PromptedForInput,
    /// The run failed. `notified` tells whether the failure message got out.
    Failed { error: PipelineError, notified: bool },
}

impl RunOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered { .. })
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Runs requests end to end against injected collaborators.
///
/// Holds no per-run state, so one pipeline can serve concurrent runs.
pub struct AnswerPipeline<S: Solver, D: Delivery> {
    solver: S,
    delivery: D,
    fetcher: Arc<dyn AttachmentFetcher>,
    extractor: TextExtractor,
    profiles: ProfileInstructions,
    config: PipelineConfig,
}

impl<S: Solver, D: Delivery> AnswerPipeline<S, D> {
    /// Create a pipeline. The extractor takes its limits from `config`.
    pub fn new(
        solver: S,
        delivery: D,
        fetcher: Arc<dyn AttachmentFetcher>,
        extractor: TextExtractor,
        config: PipelineConfig,
    ) -> Self {
        let profiles = config.profile_instructions();
        let brief_hash = hash_prompt(&profiles.brief);
        let detailed_hash = hash_prompt(&profiles.detailed);
        info!(
            "AnswerPipeline using solver {} (brief prompt {}, detailed prompt {})",
            solver.name(),
            &brief_hash[..12],
            &detailed_hash[..12]
        );

        Self {
            solver,
            delivery,
            fetcher,
            extractor: extractor.with_config(config.extractor_config()),
            profiles,
            config,
        }
    }

    /// Create a pipeline that runs OCR with the local `tesseract` binary.
    pub fn with_tesseract(
        solver: S,
        delivery: D,
        fetcher: Arc<dyn AttachmentFetcher>,
        config: PipelineConfig,
    ) -> Self {
        let ocr = TesseractCli::new(config.ocr_language.clone());
        let extractor = TextExtractor::new(Arc::new(ocr));
        Self::new(solver, delivery, fetcher, extractor, config)
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Handle every request carried by one event, in order.
    pub async fn handle_event(&self, event: InboundEvent) -> Vec<RunOutcome> {
        let target = event.target.clone();
        let requests = event.into_requests();
        info!(
            "Handling event in {} with {} request(s)",
            target.channel,
            requests.len()
        );

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            outcomes.push(self.run(request, &target).await);
        }
        outcomes
    }

    /// Run one request to a terminal outcome.
    ///
    /// Every failure is reported to `target` with exactly one message.
    pub async fn run(&self, request: InboundRequest, target: &ReplyTarget) -> RunOutcome {
        match self.execute(request, target).await {
            Ok(outcome) => outcome,
            Err(error) => self.report_failure(error, target).await,
        }
    }

    async fn execute(
        &self,
        request: InboundRequest,
        target: &ReplyTarget,
    ) -> Result<RunOutcome, PipelineError> {
        let (content, origin, attachment) = match request.attachment {
            Some(attachment) => {
                let document = self.extract(&attachment).await?;
                (document.text, Origin::FileAttachment, Some(attachment))
            }
            None => (request.raw_text.unwrap_or_default(), Origin::PlainText, None),
        };

        let source_text = (origin == Origin::FileAttachment && self.config.include_source_text)
            .then(|| content.clone());

        let (content, truncated) = fit_content(content, self.config.max_content_chars);
        if truncated {
            warn!(
                "Content truncated to {} chars before solving",
                self.config.max_content_chars
            );
        }

        let solver_request = match build_request(&content, origin, &self.profiles) {
            RequestPlan::Solve(request) => request,
            RequestPlan::PromptForInput => {
                debug!("Empty request, prompting for input");
                self.delivery
                    .send_text(target, PROMPT_FOR_INPUT)
                    .await
                    .map_err(|e| PipelineError::DeliveryFailed(e.0))?;
                return Ok(RunOutcome::PromptedForInput);
            }
        };

        let profile = solver_request.profile;
        info!(
            "Solving with {} profile via {} ({} chars)",
            profile,
            self.solver.name(),
            solver_request.user_content.chars().count()
        );
        let answer = self.solver.solve(solver_request).await?;
        if answer.text.trim().is_empty() {
            return Err(PipelineError::SolverRejected("empty answer".to_string()));
        }
        info!(
            "Answer from {}: {} chars",
            answer.model.as_deref().unwrap_or("unknown model"),
            answer.char_len()
        );

        let reply_mode = match origin {
            Origin::PlainText => FileReplyMode::Chunked,
            Origin::FileAttachment => self.config.file_reply_mode,
        };

        let display_name = attachment.as_ref().and_then(|a| a.display_name.as_deref());
        let artifacts = self.assemble(reply_mode, display_name, &answer.text, source_text.as_deref());

        let mut chunks_sent = 0;
        let mut document_pages = None;
        for artifact in artifacts {
            debug!("Delivering {}", artifact.kind());
            match artifact {
                OutputArtifact::Chunked(chunked) => {
                    chunks_sent = self.send_chunks(target, &chunked).await?;
                }
                OutputArtifact::Document(document) => {
                    document_pages = Some(self.send_document(target, display_name, &document).await?);
                }
            }
        }

        Ok(RunOutcome::Answered {
            profile,
            chunks_sent,
            document_pages,
        })
    }

    async fn extract(&self, attachment: &Attachment) -> Result<ExtractedDocument, PipelineError> {
        let name = attachment.display_name.as_deref().unwrap_or("attachment");
        let strategy = classify(attachment)?;
        debug!("Classified {} ({}) as {:?}", name, attachment.content_type, strategy);

        let bytes = ByteSource::new(self.fetcher.as_ref(), attachment)
            .fetch()
            .await
            .map_err(|e| PipelineError::AttachmentUnavailable(e.0))?;

        Ok(self.extractor.extract(strategy, &bytes).await?)
    }

    /// Build every artifact this run delivers, chunks before the document.
    fn assemble(
        &self,
        reply_mode: FileReplyMode,
        display_name: Option<&str>,
        answer: &str,
        source_text: Option<&str>,
    ) -> Vec<OutputArtifact> {
        let mut artifacts = Vec::with_capacity(2);
        if reply_mode.sends_chunks() {
            artifacts.push(OutputArtifact::chunked(answer, self.config.chunk_size_limit));
        }
        if reply_mode.sends_document() {
            artifacts.push(OutputArtifact::document(
                &document_title(display_name),
                &compose_body(answer, source_text),
                &self.config.layout,
            ));
        }
        artifacts
    }

    async fn send_chunks(
        &self,
        target: &ReplyTarget,
        chunked: &ChunkedText,
    ) -> Result<usize, PipelineError> {
        let total = chunked.len();
        debug!("Sending answer as {} chunk(s)", total);

        for (index, chunk) in chunked.chunks().iter().enumerate() {
            self.delivery.send_text(target, chunk).await.map_err(|e| {
                PipelineError::DeliveryFailed(format!("message {} of {}: {}", index + 1, total, e))
            })?;
        }
        Ok(total)
    }

    async fn send_document(
        &self,
        target: &ReplyTarget,
        display_name: Option<&str>,
        document: &PaginatedDocument,
    ) -> Result<usize, PipelineError> {
        let filename = document_filename(display_name);
        let bytes = render_pdf(document, &self.config.layout).map_err(|e| {
            PipelineError::DeliveryFailed(format!("could not build the document: {}", e))
        })?;

        // Dropping the temp file deletes it, so every early return cleans up.
        let file = tempfile::Builder::new()
            .prefix("solution_")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| PipelineError::DeliveryFailed(format!("could not stage the document: {}", e)))?;
        tokio::fs::write(file.path(), &bytes)
            .await
            .map_err(|e| PipelineError::DeliveryFailed(format!("could not stage the document: {}", e)))?;

        let sent = self
            .delivery
            .send_document(
                target,
                DocumentUpload {
                    path: file.path(),
                    filename: &filename,
                    title: &document.title,
                    caption: DOCUMENT_CAPTION,
                },
            )
            .await;

        let path = file.path().to_path_buf();
        match file.close() {
            Ok(()) => debug!("Released {}", path.display()),
            Err(e) => warn!("Could not remove {}: {}", path.display(), e),
        }

        sent.map_err(|e| PipelineError::DeliveryFailed(e.0))?;
        info!(
            "Delivered {} ({} pages, {} bytes)",
            filename,
            document.page_count(),
            bytes.len()
        );
        Ok(document.page_count())
    }

    async fn report_failure(&self, error: PipelineError, target: &ReplyTarget) -> RunOutcome {
        warn!(
            "Run failed [{}] (retriable: {}): {}",
            error.kind(),
            error.is_retriable(),
            error
        );

        let notified = match self.delivery.send_text(target, &error.user_message()).await {
            Ok(()) => true,
            Err(e) => {
                error!("Could not report failure to {}: {}", target.channel, e);
                false
            }
        };
        RunOutcome::Failed { error, notified }
    }
}
