use crate::cli::prompt::resolve_token;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use ziplift::archive::format_bytes;
use ziplift::core::{ZipliftError, ZipliftResult};
use ziplift::di::ServiceContainer;
use ziplift::sync::UploadProgress;
use ziplift::upload::{BranchMode, Credentials, Session, UploadOptions, UploadOrchestrator};

pub struct UploadArgs {
    pub config: Option<PathBuf>,
    pub archive: PathBuf,
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub branch_mode: BranchMode,
    pub branch: Option<String>,
    pub message: Option<String>,
    pub yes: bool,
}

pub async fn run(args: UploadArgs) -> ZipliftResult<()> {
    let config = super::load_config(args.config.as_deref())?;
    let credentials = Credentials::new(resolve_token(args.token)?, &args.owner, &args.repo);
    let repo = credentials.repo.clone();

    let cancel = Arc::new(AtomicBool::new(false));
    let orchestrator = UploadOrchestrator::new(ServiceContainer::new(config, &credentials.token)?)
        .with_cancel(Arc::clone(&cancel));

    let bar = ProgressBar::hidden();
    let mut session = Session::new(credentials);
    {
        let bar = bar.clone();
        session
            .log_mut()
            .set_listener(move |line| bar.suspend(|| println!("{}", line)));
    }

    // Archive limits are enforced before any request goes out
    orchestrator.load_archive(&mut session, &args.archive)?;
    orchestrator.check_access(&mut session).await?;

    let target = match args.branch_mode {
        BranchMode::Default => "the default branch".to_string(),
        BranchMode::New => format!(
            "branch {}",
            args.branch.as_deref().unwrap_or("upload-<today>")
        ),
    };
    println!();
    println!(
        "About to upload {} files ({}) to {} on {}",
        session.files().len(),
        format_bytes(session.total_bytes()),
        repo,
        target
    );
    if !args.yes && std::io::stdin().is_terminal() {
        let proceed = Confirm::new()
            .with_prompt("Continue?")
            .default(true)
            .interact()
            .map_err(|e| ZipliftError::Validation(format!("Failed to read input: {}", e)))?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::SeqCst);
            }
        });
    }

    bar.set_length(session.files().len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
            .map_err(|e| ZipliftError::Config(format!("Invalid progress template: {}", e)))?
            .progress_chars("#>-"),
    );
    bar.set_draw_target(ProgressDrawTarget::stderr());

    let options = UploadOptions {
        branch_mode: args.branch_mode,
        branch_name: args.branch,
        commit_message: args.message,
    };
    let result = orchestrator
        .run(&mut session, &options, &mut |p: &UploadProgress| {
            bar.set_position(p.done as u64);
            bar.set_message(p.last_path.clone());
        })
        .await;
    bar.finish_and_clear();

    let outcome = result?;
    println!();
    println!(
        "✓ Uploaded {} files to {} ({})",
        outcome.uploaded, repo, outcome.branch
    );
    println!("  {}", outcome.url);

    orchestrator.close(&mut session);
    Ok(())
}
