use std::io::{self, Write};

use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use forum_api::routes::params::PaginationParams;
use forum_api::store::{self, FetchScope};
use forum_api::threading::TreeNode;
use forum_api::validation::parse_message_id;

#[derive(Parser, Debug)]
#[command(
    name = "forum_tree",
    about = "Print forum threads with their nested replies"
)]
struct Args {
    /// Print only the replies below this thread id.
    #[arg(long)]
    thread: Option<String>,

    /// Page of threads to print when no thread is given.
    #[arg(long, default_value_t = 1)]
    page: i64,

    /// Threads per page.
    #[arg(long, default_value_t = 20)]
    size: i64,

    /// Emit JSON instead of an indented outline.
    #[arg(long)]
    json: bool,
}

fn write_outline(out: &mut impl Write, forest: &[TreeNode]) -> io::Result<()> {
    // Iterative so that very deep threads print without recursion
    let mut stack: Vec<&TreeNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        let indent = "  ".repeat(node.depth as usize);
        let first_line = node.message.content.lines().next().unwrap_or_default();
        writeln!(
            out,
            "{indent}- [{}] {} ({}): {}",
            node.message.id,
            node.message.author,
            node.message.created_at.format("%Y-%m-%d %H:%M"),
            first_line
        )?;
        stack.extend(node.children.iter().rev());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    forum_api::init_logger();

    let args = Args::parse();

    let scope = match args.thread.as_deref() {
        Some(raw) => FetchScope::Thread(parse_message_id(raw)?),
        None => FetchScope::AllThreads,
    };
    let pagination = PaginationParams {
        page: args.page,
        size: Some(args.size),
    };
    let size = pagination.size(args.size);
    let offset = pagination.offset(args.size);

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    let fetched = store::fetch_roots_and_descendants(&pool, scope, size, offset).await?;
    let message_count = fetched.message_count();
    let forest = fetched.into_trees()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &forest)?;
        writeln!(out)?;
    } else {
        write_outline(&mut out, &forest)?;
    }

    log::info!("printed {} trees from {} messages", forest.len(), message_count);
    Ok(())
}
