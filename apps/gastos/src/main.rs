use std::{io, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gastos_client::{
    parse_date_input, CommandOutcome, ExpenseController, FormDraft, HttpExpenseGateway,
};
use shared::domain::ExpenseId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod ui;

use config::{load_settings, parse_base_url};
use console::{confirm, spawn_busy_indicator, Console};

#[derive(Parser, Debug)]
#[command(name = "gastos", about = "Controle de gastos pessoais")]
struct Cli {
    /// Optional TOML file with `base_url` and `accept_invalid_certs`.
    #[arg(long, default_value = "gastos.toml")]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    accept_invalid_certs: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the listing and the total.
    List,
    Add {
        #[arg(long)]
        descricao: String,
        /// Defaults to today.
        #[arg(long)]
        data: Option<String>,
        #[arg(long)]
        valor: String,
    },
    /// Replaces an existing expense; omitted fields keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        descricao: Option<String>,
        #[arg(long)]
        data: Option<String>,
        #[arg(long)]
        valor: Option<String>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut settings = load_settings(&cli.config)?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if cli.accept_invalid_certs {
        settings.accept_invalid_certs = true;
    }

    let base_url = parse_base_url(&settings.base_url)?;
    let http = reqwest::Client::builder()
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .build()
        .context("failed to build http client")?;
    info!(base_url = %base_url, "using expense api");

    let gateway = Arc::new(HttpExpenseGateway::with_client(http, base_url));
    let mut controller = ExpenseController::new(gateway);

    match cli.command {
        None => {
            spawn_busy_indicator(&controller);
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            console.run(&mut controller).await?;
        }
        Some(command) => run_command(&mut controller, command).await?,
    }

    Ok(())
}

async fn run_command(controller: &mut ExpenseController, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let outcome = controller.load().await;
            ensure_applied(controller, outcome)?;
        }
        Command::Add {
            descricao,
            data,
            valor,
        } => {
            let mut draft = FormDraft {
                description: descricao,
                amount: valor,
                ..FormDraft::default()
            };
            if let Some(raw) = data {
                draft.date = Some(parse_cli_date(&raw)?);
            }
            set_draft(controller, draft)?;
            let outcome = controller.submit().await;
            ensure_applied(controller, outcome)?;
        }
        Command::Update {
            id,
            descricao,
            data,
            valor,
        } => {
            let outcome = controller.load().await;
            ensure_applied(controller, outcome)?;
            if controller.begin_edit(ExpenseId(id)) != CommandOutcome::Applied {
                bail!("nenhum gasto com id {id}");
            }

            let mut draft = controller.state().draft.clone();
            if let Some(descricao) = descricao {
                draft.description = descricao;
            }
            if let Some(raw) = data {
                draft.date = Some(parse_cli_date(&raw)?);
            }
            if let Some(valor) = valor {
                draft.amount = valor;
            }
            set_draft(controller, draft)?;
            let outcome = controller.submit().await;
            ensure_applied(controller, outcome)?;
        }
        Command::Delete { id, yes } => {
            let outcome = if yes {
                controller.delete(ExpenseId(id), &mut |_: &str| true).await
            } else {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut output = io::stdout();
                controller
                    .delete(ExpenseId(id), &mut |prompt: &str| {
                        confirm(&mut input, &mut output, prompt)
                    })
                    .await
            };
            if outcome == CommandOutcome::Declined {
                return Ok(());
            }
            ensure_applied(controller, outcome)?;
        }
    }

    println!("{}", ui::render_screen(controller.state()));
    Ok(())
}

fn set_draft(controller: &mut ExpenseController, draft: FormDraft) -> Result<()> {
    let Some(slot) = controller.draft_mut() else {
        bail!("another command is still running");
    };
    *slot = draft;
    Ok(())
}

fn parse_cli_date(raw: &str) -> Result<chrono::NaiveDate> {
    parse_date_input(raw)
        .with_context(|| format!("data inválida '{raw}' (use AAAA-MM-DD ou DD/MM/AAAA)"))
}

fn ensure_applied(controller: &ExpenseController, outcome: CommandOutcome) -> Result<()> {
    if outcome == CommandOutcome::Applied {
        return Ok(());
    }
    match &controller.state().error {
        Some(message) => bail!("{message}"),
        None => bail!("operação não concluída ({outcome:?})"),
    }
}
