//! End-to-end pipeline runs against fakes.

mod common;

use std::sync::Arc;

use answer_pipeline::{
    Attachment, FileReplyMode, InboundEvent, InboundRequest, PipelineConfig, PipelineError,
    ReplyTarget, RunOutcome, SolverProfile, DOCUMENT_CAPTION, PROMPT_FOR_INPUT,
};
use common::{pipeline, text_pdf, MemoryFetcher, RecordingDelivery, ScriptedOcr, Sent};
use extraction::{ExtractionError, PAGE_SEPARATOR};
use mock_solver::{DelayedSolver, EchoSolver, FailingSolver, FixedSolver, RecordingSolver};

fn target() -> ReplyTarget {
    ReplyTarget::new("C1").in_thread("1700000000.000100")
}

fn chunked_config() -> PipelineConfig {
    PipelineConfig::builder()
        .file_reply_mode(FileReplyMode::Chunked)
        .build()
}

fn pdf_attachment(locator: &str, name: &str) -> Attachment {
    Attachment::new("application/pdf", locator)
        .with_declared_kind("pdf")
        .with_display_name(name)
}

// ============================================================================
// Structural documents
// ============================================================================

#[tokio::test]
async fn test_two_page_pdf_answered_as_one_chunk() {
    let fetcher = Arc::new(
        MemoryFetcher::default().with_file("f/hw", text_pdf(&["Q1: 2+2", "Q2: capital of France"])),
    );
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("A1: 4\nA2: Paris")),
        RecordingDelivery::default(),
        fetcher.clone(),
        ScriptedOcr::new("unused"),
        chunked_config(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/hw", "hw.pdf")), &target())
        .await;

    assert!(
        matches!(
            outcome,
            RunOutcome::Answered {
                profile: SolverProfile::Detailed,
                chunks_sent: 1,
                document_pages: None
            }
        ),
        "{:?}",
        outcome
    );

    let requests = p.solver().requests().await;
    assert_eq!(requests.len(), 1);
    let content = &requests[0].user_content;
    let q1 = content.find("Q1").expect("first page text");
    let sep = content.find(PAGE_SEPARATOR.trim()).expect("page marker");
    let q2 = content.find("France").expect("second page text");
    assert!(q1 < sep && sep < q2, "{content}");

    assert_eq!(p.delivery().texts(), vec!["A1: 4\nA2: Paris".to_string()]);
    assert_eq!(fetcher.fetches(), vec!["f/hw".to_string()]);
}

#[tokio::test]
async fn test_pdf_answered_as_document() {
    let fetcher = Arc::new(
        MemoryFetcher::default().with_file("f/ws", text_pdf(&["Solve for x: 3x + 1 = 10"])),
    );
    let p = pipeline(
        FixedSolver::new("x = 3"),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new("unused"),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/ws", "worksheet.pdf")), &target())
        .await;
    assert!(matches!(
        outcome,
        RunOutcome::Answered {
            chunks_sent: 0,
            document_pages: Some(1),
            ..
        }
    ));

    let sent = p.delivery().sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Sent::Document {
            path,
            filename,
            title,
            caption,
            bytes,
        } => {
            assert_eq!(filename, "solution_worksheet.pdf");
            assert_eq!(title, "Solved worksheet.pdf");
            assert_eq!(caption, DOCUMENT_CAPTION);
            assert!(bytes.starts_with(b"%PDF-"));
            assert!(!path.exists(), "staged document was not removed");
        }
        other => panic!("expected a document, got {:?}", other),
    }
}

#[tokio::test]
async fn test_both_mode_sends_chunks_then_document() {
    let fetcher =
        Arc::new(MemoryFetcher::default().with_file("f/ws", text_pdf(&["Name three primes."])));
    let p = pipeline(
        FixedSolver::new("2, 3, 5"),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new("unused"),
        PipelineConfig::builder()
            .file_reply_mode(FileReplyMode::Both)
            .include_source_text(true)
            .build(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/ws", "primes.pdf")), &target())
        .await;
    assert!(outcome.is_answered());

    let sent = p.delivery().sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[0], Sent::Text(t) if t == "2, 3, 5"));
    assert!(matches!(&sent[1], Sent::Document { .. }));
}

#[tokio::test]
async fn test_document_rejected_by_destination() {
    let fetcher =
        Arc::new(MemoryFetcher::default().with_file("f/ws", text_pdf(&["What is 12 squared?"])));
    let p = pipeline(
        FixedSolver::new("144"),
        RecordingDelivery::rejecting_documents(),
        fetcher,
        ScriptedOcr::new("unused"),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/ws", "sq.pdf")), &target())
        .await;

    match &outcome {
        RunOutcome::Failed { error, notified } => {
            assert!(matches!(error, PipelineError::DeliveryFailed(_)));
            assert!(*notified);
        }
        other => panic!("expected failure, got {:?}", other),
    }

    let sent = p.delivery().sent();
    assert_eq!(sent.len(), 2);
    match &sent[0] {
        Sent::Document { path, .. } => assert!(!path.exists()),
        other => panic!("expected a document first, got {:?}", other),
    }
    assert!(matches!(&sent[1], Sent::Text(t) if t.contains("file too large")));
}

#[tokio::test]
async fn test_scanned_pdf_rejected_without_solving() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/scan", text_pdf(&["", ""])));
    let ocr = ScriptedOcr::new("This text would have come from OCR");
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("never")),
        RecordingDelivery::default(),
        fetcher,
        ocr.clone(),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/scan", "scan.pdf")), &target())
        .await;

    assert!(matches!(
        outcome.error(),
        Some(PipelineError::ExtractionFailed(ExtractionError::BelowMinimumLength { .. }))
    ));
    assert_eq!(p.solver().call_count().await, 0);
    assert_eq!(ocr.calls(), 0);
    assert_eq!(p.delivery().texts().len(), 1);
}

#[tokio::test]
async fn test_pdf_with_only_page_numbers_is_not_solved() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/scan", text_pdf(&["1", "2"])));
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("never")),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new("unused"),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/scan", "scan.pdf")), &target())
        .await;

    assert!(matches!(
        outcome.error(),
        Some(PipelineError::ExtractionFailed(ExtractionError::BelowMinimumLength { .. }))
    ));
    assert_eq!(p.solver().call_count().await, 0);
}

#[tokio::test]
async fn test_malformed_pdf() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/bad", b"%PDF-1.4 garbage".to_vec()));
    let p = pipeline(
        FixedSolver::new("never"),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/bad", "bad.pdf")), &target())
        .await;
    let error = outcome.error().expect("failure");
    assert_eq!(error.kind(), "extraction_failed");
    assert!(!error.is_retriable());
}

// ============================================================================
// Images
// ============================================================================

#[tokio::test]
async fn test_blank_ocr_fails_extraction_without_solving() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/img", b"\x89PNG\r\n".to_vec()));
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("never")),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(
            InboundRequest::file(Attachment::new("image/png", "f/img").with_display_name("q.png")),
            &target(),
        )
        .await;

    assert!(matches!(
        outcome,
        RunOutcome::Failed {
            error: PipelineError::ExtractionFailed(_),
            notified: true
        }
    ));
    assert_eq!(p.solver().call_count().await, 0);
    assert_eq!(p.delivery().texts().len(), 1);
}

#[tokio::test]
async fn test_image_ocr_is_solved_with_detailed_profile() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/img", b"\xff\xd8\xff".to_vec()));
    let p = pipeline(
        RecordingSolver::new(EchoSolver::new()),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new("  7. What is the square root of 81?\n"),
        chunked_config(),
    );

    let outcome = p
        .run(
            InboundRequest::file(Attachment::new("image/jpeg", "f/img")),
            &target(),
        )
        .await;
    assert!(outcome.is_answered());

    let requests = p.solver().requests().await;
    assert_eq!(requests[0].profile, SolverProfile::Detailed);
    assert_eq!(requests[0].user_content, "7. What is the square root of 81?");
}

// ============================================================================
// Unsupported and unavailable attachments
// ============================================================================

#[tokio::test]
async fn test_zip_rejected_before_fetch() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/zip", b"PK\x03\x04".to_vec()));
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("never")),
        RecordingDelivery::default(),
        fetcher.clone(),
        ScriptedOcr::new("never"),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(
            InboundRequest::file(
                Attachment::new("application/zip", "f/zip").with_declared_kind("zip"),
            ),
            &target(),
        )
        .await;

    assert!(matches!(
        outcome.error(),
        Some(PipelineError::UnsupportedAttachmentKind { .. })
    ));
    assert!(fetcher.fetches().is_empty());
    assert_eq!(p.solver().call_count().await, 0);
    assert_eq!(
        p.delivery().texts(),
        vec!["Sorry, I can't process files of type `zip`. Please send a text, PDF, or image.".to_string()]
    );
}

#[tokio::test]
async fn test_fetch_failure_is_attachment_unavailable() {
    let p = pipeline(
        FixedSolver::new("never"),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::file(pdf_attachment("f/missing", "gone.pdf")), &target())
        .await;
    let error = outcome.error().expect("failure");
    assert!(matches!(error, PipelineError::AttachmentUnavailable(_)));
    assert!(error.is_retriable());
}

// ============================================================================
// Text questions
// ============================================================================

#[tokio::test]
async fn test_text_question_uses_brief_profile() {
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("Paris")),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p
        .run(InboundRequest::text("  What is the capital of France? "), &target())
        .await;
    assert!(matches!(
        outcome,
        RunOutcome::Answered {
            profile: SolverProfile::Brief,
            chunks_sent: 1,
            document_pages: None
        }
    ));
    assert_eq!(
        p.solver().requests().await[0].user_content,
        "What is the capital of France?"
    );
}

#[tokio::test]
async fn test_long_answer_is_chunked_not_truncated() {
    let answer = "Step. ".repeat(1000);
    let p = pipeline(
        FixedSolver::new(answer.clone()),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p.run(InboundRequest::text("Explain."), &target()).await;
    assert!(matches!(outcome, RunOutcome::Answered { chunks_sent: 3, .. }));

    let texts = p.delivery().texts();
    assert!(texts.iter().all(|t| t.chars().count() <= 2800));
    assert_eq!(texts.concat(), answer);
}

#[tokio::test]
async fn test_empty_request_prompts_for_input() {
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("never")),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p.run(InboundRequest::empty(), &target()).await;
    assert!(matches!(outcome, RunOutcome::PromptedForInput));
    assert_eq!(p.delivery().texts(), vec![PROMPT_FOR_INPUT.to_string()]);
    assert_eq!(p.solver().call_count().await, 0);
}

#[tokio::test]
async fn test_oversized_content_is_truncated_before_solving() {
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("ok")),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::builder().max_content_chars(40).build(),
    );

    p.run(InboundRequest::text("word ".repeat(50)), &target()).await;
    let content = &p.solver().requests().await[0].user_content;
    assert!(content.contains("[Content truncated"));
}

// ============================================================================
// Solver failures
// ============================================================================

#[tokio::test]
async fn test_solver_unavailable_reports_once() {
    let p = pipeline(
        FailingSolver::unavailable(),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p.run(InboundRequest::text("2+2?"), &target()).await;
    let error = outcome.error().expect("failure");
    assert!(matches!(error, PipelineError::SolverUnavailable(_)));
    assert!(error.is_retriable());
    assert_eq!(p.delivery().texts().len(), 1);
}

#[tokio::test]
async fn test_solver_rejection() {
    let p = pipeline(
        FailingSolver::rejected("content policy"),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p.run(InboundRequest::text("2+2?"), &target()).await;
    assert!(matches!(outcome.error(), Some(PipelineError::SolverRejected(_))));
}

#[tokio::test]
async fn test_blank_answer_is_rejection() {
    let p = pipeline(
        FixedSolver::new("   "),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcome = p.run(InboundRequest::text("2+2?"), &target()).await;
    assert!(matches!(outcome.error(), Some(PipelineError::SolverRejected(_))));
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_event_with_two_attachments_runs_twice() {
    let fetcher = Arc::new(
        MemoryFetcher::default()
            .with_file("f/a", text_pdf(&["What is the speed of light?"]))
            .with_file("f/b", b"\x89PNG".to_vec()),
    );
    let p = pipeline(
        RecordingSolver::new(FixedSolver::new("answer")),
        RecordingDelivery::default(),
        fetcher.clone(),
        ScriptedOcr::new("What is the atomic number of carbon?"),
        chunked_config(),
    );

    let event = InboundEvent::new("<@UBOT> solve both please", target())
        .with_attachment(pdf_attachment("f/a", "a.pdf"))
        .with_attachment(Attachment::new("image/png", "f/b").with_display_name("b.png"));

    let outcomes = p.handle_event(event).await;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(RunOutcome::is_answered));
    assert_eq!(fetcher.fetches(), vec!["f/a".to_string(), "f/b".to_string()]);

    let requests = p.solver().requests().await;
    assert!(requests.iter().all(|r| !r.user_content.contains("solve both")));
}

#[tokio::test]
async fn test_mixed_event_isolates_failures() {
    let fetcher = Arc::new(MemoryFetcher::default().with_file("f/ok", text_pdf(&["Define entropy briefly."])));
    let p = pipeline(
        FixedSolver::new("A measure of disorder."),
        RecordingDelivery::default(),
        fetcher,
        ScriptedOcr::new(""),
        chunked_config(),
    );

    let event = InboundEvent::new("<@UBOT>", target())
        .with_attachment(Attachment::new("application/zip", "f/zip"))
        .with_attachment(pdf_attachment("f/ok", "ok.pdf"));

    let outcomes = p.handle_event(event).await;
    assert!(outcomes[0].error().is_some());
    assert!(outcomes[1].is_answered());
    assert_eq!(p.delivery().texts().len(), 2);
}

#[tokio::test]
async fn test_empty_mention_event() {
    let p = pipeline(
        FixedSolver::new("never"),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    );

    let outcomes = p.handle_event(InboundEvent::new("<@UBOT>  ", target())).await;
    assert!(matches!(outcomes.as_slice(), [RunOutcome::PromptedForInput]));
}

#[tokio::test]
async fn test_concurrent_runs_share_nothing() {
    let p = Arc::new(pipeline(
        RecordingSolver::new(DelayedSolver::with_millis(EchoSolver::new(), 20)),
        RecordingDelivery::default(),
        Arc::new(MemoryFetcher::default()),
        ScriptedOcr::new(""),
        PipelineConfig::default(),
    ));

    let a = {
        let p = p.clone();
        tokio::spawn(async move { p.run(InboundRequest::text("first question"), &target()).await })
    };
    let b = {
        let p = p.clone();
        tokio::spawn(async move { p.run(InboundRequest::text("second question"), &target()).await })
    };

    assert!(a.await.unwrap().is_answered());
    assert!(b.await.unwrap().is_answered());

    let texts = p.delivery().texts();
    assert_eq!(texts.len(), 2);
    assert!(texts.iter().any(|t| t.contains("first question")));
    assert!(texts.iter().any(|t| t.contains("second question")));
}
