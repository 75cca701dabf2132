//! Hidden generate-man command, used when packaging

use clap::CommandFactory;
use std::fs;
use std::io::Write;

use super::GenerateManArgs;
use crate::cli::{exit_codes, Cli};
use crate::error::{AuditError, OutputError};

/// Render the roff man page for the whole command tree
pub fn render_man() -> Result<Vec<u8>, OutputError> {
    let mut page = Vec::new();
    clap_mangen::Man::new(Cli::command())
        .render(&mut page)
        .map_err(OutputError::Man)?;
    Ok(page)
}

/// Write `<dir>/github-org-audit.1`, or the page itself to stdout without `--output`
pub async fn execute(args: GenerateManArgs) -> Result<i32, AuditError> {
    let page = render_man()?;

    let Some(dir) = args.output else {
        std::io::stdout()
            .write_all(&page)
            .map_err(OutputError::Man)?;
        return Ok(exit_codes::SUCCESS);
    };

    let path = dir.join(format!("{}.1", Cli::command().get_name()));
    fs::write(&path, page).map_err(|e| OutputError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })?;
    eprintln!("Man page generated: {}", path.display());

    Ok(exit_codes::SUCCESS)
}
