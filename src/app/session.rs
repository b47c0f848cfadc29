use crate::app::action::Action;
use crate::app::dapp::Dapp;
use crate::domain::ports::EthProvider;
use crate::utils::error::Result;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One session line, parsed with the same grammar as the CLI subcommands.
#[derive(Debug, Parser)]
#[command(name = "flightsurety", no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    action: Action,
}

pub const PROMPT: &str = "flightsurety> ";

/// Reads actions line by line until EOF or `quit`.
pub async fn run_session<P, R, W>(dapp: &mut Dapp<P>, input: R, out: &mut W) -> Result<usize>
where
    P: EthProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut executed = 0;

    write!(out, "{}", PROMPT)?;
    out.flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }

        if !line.is_empty() && !line.starts_with('#') {
            match SessionLine::try_parse_from(line.split_whitespace()) {
                Ok(parsed) => {
                    tracing::debug!("Session action: {:?}", parsed.action);
                    parsed.action.apply(dapp, out).await?;
                    executed += 1;
                }
                // 包含 help 與參數錯誤訊息
                Err(e) => write!(out, "{}", e.render())?,
            }
        }

        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    writeln!(out)?;
    tracing::info!("Session finished after {} actions", executed);
    Ok(executed)
}
