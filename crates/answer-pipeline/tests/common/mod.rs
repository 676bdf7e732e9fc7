//! Shared fakes for pipeline scenario tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use answer_pipeline::{
    AnswerPipeline, AttachmentFetcher, Delivery, DeliveryError, DocumentUpload, FetchError,
    PipelineConfig, ReplyTarget, Solver,
};
use async_trait::async_trait;
use extraction::{ExtractionError, OcrEngine, TextExtractor};

pub use extraction::fixtures::text_pdf;

/// In-memory attachment store that counts fetches per locator.
#[derive(Default)]
pub struct MemoryFetcher {
    files: HashMap<String, Vec<u8>>,
    fetches: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn with_file(mut self, locator: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(locator.to_string(), bytes);
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttachmentFetcher for MemoryFetcher {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        self.fetches.lock().unwrap().push(locator.to_string());
        self.files
            .get(locator)
            .cloned()
            .ok_or_else(|| FetchError(format!("404 for {}", locator)))
    }
}

/// OCR engine returning canned text.
pub struct ScriptedOcr {
    pub text: String,
    pub calls: AtomicUsize,
}

impl ScriptedOcr {
    pub fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcr {
    async fn recognize(&self, _image: &[u8]) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Something the pipeline sent.
#[derive(Debug, Clone)]
pub enum Sent {
    Text(String),
    Document {
        path: PathBuf,
        filename: String,
        title: String,
        caption: String,
        bytes: Vec<u8>,
    },
}

/// Delivery that records everything and can be told to refuse documents.
#[derive(Default)]
pub struct RecordingDelivery {
    sent: Mutex<Vec<Sent>>,
    reject_documents: bool,
}

impl RecordingDelivery {
    pub fn rejecting_documents() -> Self {
        Self {
            reject_documents: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Delivery for RecordingDelivery {
    async fn send_text(&self, _target: &ReplyTarget, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_document(
        &self,
        _target: &ReplyTarget,
        document: DocumentUpload<'_>,
    ) -> Result<(), DeliveryError> {
        let bytes = std::fs::read(document.path).unwrap();
        self.sent.lock().unwrap().push(Sent::Document {
            path: document.path.to_path_buf(),
            filename: document.filename.to_string(),
            title: document.title.to_string(),
            caption: document.caption.to_string(),
            bytes,
        });
        if self.reject_documents {
            return Err(DeliveryError("file too large".to_string()));
        }
        Ok(())
    }
}

pub fn pipeline<S: Solver>(
    solver: S,
    delivery: RecordingDelivery,
    fetcher: Arc<MemoryFetcher>,
    ocr: Arc<ScriptedOcr>,
    config: PipelineConfig,
) -> AnswerPipeline<S, RecordingDelivery> {
    AnswerPipeline::new(solver, delivery, fetcher, TextExtractor::new(ocr), config)
}
