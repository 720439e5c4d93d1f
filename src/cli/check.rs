use crate::cli::prompt::resolve_token;
use std::path::Path;
use ziplift::core::ZipliftResult;
use ziplift::di::ServiceContainer;
use ziplift::upload::{Credentials, Session, UploadOrchestrator};

/// Validate the token and repository access, nothing else
pub async fn run(
    config_path: Option<&Path>,
    owner: String,
    repo: String,
    token: Option<String>,
) -> ZipliftResult<()> {
    let config = super::load_config(config_path)?;
    let credentials = Credentials::new(resolve_token(token)?, &owner, &repo);
    let orchestrator = UploadOrchestrator::new(ServiceContainer::new(config, &credentials.token)?);

    let mut session = Session::new(credentials);
    session.log_mut().set_listener(|line| println!("{}", line));

    orchestrator.check_access(&mut session).await?;
    orchestrator.close(&mut session);

    println!();
    println!("✓ Access OK");
    Ok(())
}
