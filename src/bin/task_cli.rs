use std::io::{self, BufRead, Write};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use taskdeck::config::ClientConfig;
use taskdeck::types::{TaskId, TaskStatus};
use taskdeck::ui::state::BannerKind;
use taskdeck::ui::{render_page, Controller, DeleteOutcome, PageView, ProxyClient, SubmitOutcome};

#[derive(Parser)]
#[command(author, version, about = "Manage tasks through the task manager proxy", long_about = None)]
struct Cli {
    /// Base URL of the proxy (defaults to PROXY_URL or http://localhost:3000)
    #[arg(long, global = true)]
    proxy_url: Option<String>,

    /// Print the page as HTML instead of text
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks
    List,
    /// Show one task in the edit form
    Show { id: TaskId },
    /// Create a task
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value = "TODO")]
        status: TaskStatus,
        /// Due date and time, e.g. 2026-03-01T09:00
        #[arg(long)]
        due: String,
    },
    /// Replace a task's fields; omitted fields keep their current value
    Edit {
        id: TaskId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Move a task to IN_PROGRESS
    Start { id: TaskId },
    /// Move a task to COMPLETED
    Complete { id: TaskId },
    /// Delete a task
    Delete {
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn prompt(message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_text(page: &PageView) {
    if let Some(banner) = &page.banner {
        for line in &banner.lines {
            println!("{}", line);
        }
        println!();
    }

    if page.form.cancel_visible {
        let fields = &page.form.fields;
        println!("{}", page.form.heading);
        println!("  Title:       {}", fields.title);
        println!("  Description: {}", fields.description);
        println!("  Status:      {}", fields.status.label());
        println!("  Due:         {}", fields.due_date_time);
        println!();
    }

    println!("Tasks {}", page.list.count_label());
    if page.list.cards.is_empty() {
        println!("  {}", taskdeck::ui::render::EMPTY_LIST_MESSAGE);
    }
    for card in &page.list.cards {
        println!("  [{}] {} ({})", card.id, card.title, card.status_label);
        if let Some(description) = &card.description {
            println!("      {}", description);
        }
        println!("      Due: {}  Created: {}", card.due, card.created);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let proxy_url = match cli.proxy_url {
        Some(url) => url,
        None => ClientConfig::from_env().proxy_url,
    };
    tracing::debug!("Using proxy at {}", proxy_url);

    let controller = Controller::new(ProxyClient::new(proxy_url)?);
    controller.load_tasks().await;

    let succeeded = match cli.command {
        Commands::List => controller.snapshot().await.banner().is_none(),
        Commands::Show { id } => controller.edit_by_id(&id).await,
        Commands::Create {
            title,
            description,
            status,
            due,
        } => {
            controller
                .update_form(|form| {
                    form.title = title;
                    form.description = description.unwrap_or_default();
                    form.status = status;
                    form.due_date_time = due;
                })
                .await;
            controller.submit().await == SubmitOutcome::Created
        }
        Commands::Edit {
            id,
            title,
            description,
            status,
            due,
        } => {
            if controller.edit_by_id(&id).await {
                controller
                    .update_form(|form| {
                        if let Some(title) = title {
                            form.title = title;
                        }
                        if let Some(description) = description {
                            form.description = description;
                        }
                        if let Some(status) = status {
                            form.status = status;
                        }
                        if let Some(due) = due {
                            form.due_date_time = due;
                        }
                    })
                    .await;
                controller.submit().await == SubmitOutcome::Updated
            } else {
                false
            }
        }
        Commands::Start { id } => controller.change_status(&id, TaskStatus::InProgress).await,
        Commands::Complete { id } => controller.change_status(&id, TaskStatus::Completed).await,
        Commands::Delete { id, yes } => {
            let outcome = if yes {
                controller.delete(&id, &|_: &str| true).await
            } else {
                controller.delete(&id, &prompt).await
            };
            outcome != DeleteOutcome::Failed
        }
    };

    let page = controller.view().await;
    if cli.html {
        print!("{}", render_page(&page));
    } else {
        print_text(&page);
    }

    let failed = page
        .banner
        .as_ref()
        .is_some_and(|banner| banner.kind == BannerKind::Error);
    if !succeeded || failed {
        bail!("request did not complete");
    }
    Ok(())
}
