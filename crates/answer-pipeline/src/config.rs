//! Pipeline configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use assembler::LayoutMetrics;
use extraction::{ExtractorConfig, ScannedPdfPolicy};
use solver_core::{DEFAULT_BRIEF_INSTRUCTION, DEFAULT_DETAILED_INSTRUCTION};

use crate::error::ConfigError;
use crate::request_builder::ProfileInstructions;

/// How answers to file attachments are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileReplyMode {
    /// A paginated PDF with a caption.
    #[default]
    Document,
    /// Message-sized text chunks.
    Chunked,
    /// Chunks first, then the PDF.
    Both,
}

impl FileReplyMode {
    pub fn sends_chunks(&self) -> bool {
        matches!(self, Self::Chunked | Self::Both)
    }

    pub fn sends_document(&self) -> bool {
        matches!(self, Self::Document | Self::Both)
    }
}

impl FromStr for FileReplyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "pdf" => Ok(Self::Document),
            "chunked" | "text" => Ok(Self::Chunked),
            "both" => Ok(Self::Both),
            other => Err(format!("expected document, chunked or both, got {}", other)),
        }
    }
}

impl fmt::Display for FileReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Chunked => write!(f, "chunked"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Configuration for an [`AnswerPipeline`](crate::AnswerPipeline).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum characters per text message.
    pub chunk_size_limit: usize,

    /// Page geometry for solved documents.
    pub layout: LayoutMetrics,

    /// Shortest extracted text accepted as a question.
    pub min_extracted_text_length: usize,

    /// Extracted text beyond this many characters is cut before solving.
    pub max_content_chars: usize,

    pub file_reply_mode: FileReplyMode,

    /// Put the extracted text above the answer in solved documents.
    pub include_source_text: bool,

    pub scanned_pdf_policy: ScannedPdfPolicy,

    /// Tesseract language code.
    pub ocr_language: String,

    /// System instruction for typed questions.
    pub brief_instruction: String,

    /// System instruction for attachments.
    pub detailed_instruction: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size_limit: 2800,
            layout: LayoutMetrics::default(),
            min_extracted_text_length: 10,
            max_content_chars: 48_000,
            file_reply_mode: FileReplyMode::Document,
            include_source_text: false,
            scanned_pdf_policy: ScannedPdfPolicy::Reject,
            ocr_language: "eng".to_string(),
            brief_instruction: DEFAULT_BRIEF_INSTRUCTION.to_string(),
            detailed_instruction: DEFAULT_DETAILED_INSTRUCTION.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CHUNK_SIZE_LIMIT` - Max characters per message (default: 2800)
    /// - `PAGE_WIDTH`, `PAGE_HEIGHT` - Page size in points (default: 612 x 792)
    /// - `PAGE_MARGIN`, `FONT_SIZE`, `LINE_HEIGHT`, `WRAP_COLUMNS` - Layout
    /// - `MIN_EXTRACTED_TEXT_LENGTH` - Minimum extracted text (default: 10)
    /// - `MAX_CONTENT_CHARS` - Content cut-off before solving (default: 48000)
    /// - `FILE_REPLY_MODE` - document, chunked or both (default: document)
    /// - `INCLUDE_SOURCE_TEXT` - true/false (default: false)
    /// - `SCANNED_PDF_POLICY` - reject or ocr_fallback (default: reject)
    /// - `OCR_LANGUAGE` - Tesseract language (default: eng)
    /// - `BRIEF_INSTRUCTION`, `DETAILED_INSTRUCTION` - Override profile instructions
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let layout = LayoutMetrics {
            page_width: parse_var("PAGE_WIDTH")?.unwrap_or(defaults.layout.page_width),
            page_height: parse_var("PAGE_HEIGHT")?.unwrap_or(defaults.layout.page_height),
            margin: parse_var("PAGE_MARGIN")?.unwrap_or(defaults.layout.margin),
            font_size: parse_var("FONT_SIZE")?.unwrap_or(defaults.layout.font_size),
            line_height: parse_var("LINE_HEIGHT")?.unwrap_or(defaults.layout.line_height),
            wrap_columns: parse_var("WRAP_COLUMNS")?.unwrap_or(defaults.layout.wrap_columns),
        };

        let config = Self {
            chunk_size_limit: parse_var("CHUNK_SIZE_LIMIT")?.unwrap_or(defaults.chunk_size_limit),
            layout,
            min_extracted_text_length: parse_var("MIN_EXTRACTED_TEXT_LENGTH")?
                .unwrap_or(defaults.min_extracted_text_length),
            max_content_chars: parse_var("MAX_CONTENT_CHARS")?
                .unwrap_or(defaults.max_content_chars),
            file_reply_mode: parse_var("FILE_REPLY_MODE")?.unwrap_or(defaults.file_reply_mode),
            include_source_text: parse_bool("INCLUDE_SOURCE_TEXT")?
                .unwrap_or(defaults.include_source_text),
            scanned_pdf_policy: parse_var("SCANNED_PDF_POLICY")?
                .unwrap_or(defaults.scanned_pdf_policy),
            ocr_language: non_empty_var("OCR_LANGUAGE").unwrap_or(defaults.ocr_language),
            brief_instruction: non_empty_var("BRIEF_INSTRUCTION")
                .unwrap_or(defaults.brief_instruction),
            detailed_instruction: non_empty_var("DETAILED_INSTRUCTION")
                .unwrap_or(defaults.detailed_instruction),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Check values that would make every run fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size_limit == 0 {
            return Err(ConfigError::Invalid {
                var: "CHUNK_SIZE_LIMIT",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_content_chars == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_CONTENT_CHARS",
                reason: "must be at least 1".to_string(),
            });
        }
        self.layout.validate().map_err(|e| ConfigError::Invalid {
            var: "PAGE_*",
            reason: e.to_string(),
        })
    }

    /// Settings for the text extractor.
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            min_text_length: self.min_extracted_text_length,
            scanned_pdf_policy: self.scanned_pdf_policy,
        }
    }

    /// Instructions for both solver profiles.
    pub fn profile_instructions(&self) -> ProfileInstructions {
        ProfileInstructions {
            brief: self.brief_instruction.clone(),
            detailed: self.detailed_instruction.clone(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match non_empty_var(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: name,
                reason: format!("{:?}: {}", raw, e),
            }),
    }
}

fn parse_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    match non_empty_var(name).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::Invalid {
                var: name,
                reason: format!("expected a boolean, got {:?}", v),
            }),
        },
    }
}

/// Builder for PipelineConfig.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn chunk_size_limit(mut self, limit: usize) -> Self {
        self.config.chunk_size_limit = limit;
        self
    }

    pub fn layout(mut self, layout: LayoutMetrics) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn min_extracted_text_length(mut self, length: usize) -> Self {
        self.config.min_extracted_text_length = length;
        self
    }

    pub fn max_content_chars(mut self, chars: usize) -> Self {
        self.config.max_content_chars = chars;
        self
    }

    pub fn file_reply_mode(mut self, mode: FileReplyMode) -> Self {
        self.config.file_reply_mode = mode;
        self
    }

    pub fn include_source_text(mut self, include: bool) -> Self {
        self.config.include_source_text = include;
        self
    }

    pub fn scanned_pdf_policy(mut self, policy: ScannedPdfPolicy) -> Self {
        self.config.scanned_pdf_policy = policy;
        self
    }

    pub fn ocr_language(mut self, language: impl Into<String>) -> Self {
        self.config.ocr_language = language.into();
        self
    }

    pub fn brief_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config.brief_instruction = instruction.into();
        self
    }

    pub fn detailed_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config.detailed_instruction = instruction.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
