use std::path::PathBuf;
use std::sync::Arc;

use answer_pipeline::{
    AnswerPipeline, Attachment, DirectoryDelivery, FileSystemFetcher, InboundRequest,
    PipelineConfig, ReplyTarget, RunOutcome, Solver,
};
use clap::Parser;
use mock_solver::EchoSolver;
use openai_solver::OpenAiSolver;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "answer-cli")]
#[command(about = "Answer a question or solve a worksheet file from the command line")]
struct Args {
    /// Worksheet to solve (PDF or image).
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Content type of --file; guessed from the extension when omitted.
    #[arg(long, requires = "file")]
    content_type: Option<String>,

    /// Question to answer.
    #[arg(long)]
    text: Option<String>,

    /// Where solved documents are written.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Echo the prompt back instead of calling the API.
    #[arg(long)]
    echo: bool,
}

fn build_request(args: &Args) -> InboundRequest {
    match (&args.file, &args.text) {
        (Some(path), _) => {
            let display_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content_type = args.content_type.clone().unwrap_or_default();
            InboundRequest::file(
                Attachment::new(content_type, path.to_string_lossy()).with_display_name(display_name),
            )
        }
        (None, Some(text)) => InboundRequest::text(text.clone()),
        (None, None) => InboundRequest::empty(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("answer_pipeline=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PipelineConfig::from_env()?;

    let solver: Arc<dyn Solver> = if args.echo {
        Arc::new(EchoSolver::new())
    } else {
        Arc::new(OpenAiSolver::from_env()?)
    };

    let pipeline = AnswerPipeline::with_tesseract(
        solver,
        DirectoryDelivery::new(&args.out_dir),
        Arc::new(FileSystemFetcher::new()),
        config,
    );

    let request = build_request(&args);
    info!("Running {:?} request", request.origin);

    match pipeline.run(request, &ReplyTarget::new("cli")).await {
        RunOutcome::Failed { error, .. } => Err(error.into()),
        _ => Ok(()),
    }
}
