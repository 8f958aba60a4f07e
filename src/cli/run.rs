use anyhow::{Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::chunk::{Chunk, Tokenizer};
use crate::config::Config;
use crate::emit::write_output;
use crate::generate::{accumulate, Accumulation};
use crate::llm::{create_completer, Completer};
use crate::scan::collect_sources;
use crate::types::SourceBlob;

use super::theme::{print_banner, print_stat, print_success, print_warning};

static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
static WRITING: Emoji<'_, '_> = Emoji("📝 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "");

/// Collected sources cut into model-sized chunks.
pub struct Prepared {
    pub blob: SourceBlob,
    pub total_tokens: usize,
    pub chunks: Vec<Chunk>,
}

pub fn prepare(config: &Config) -> Result<Prepared> {
    let blob = collect_sources(&config.project_dir, &config.extensions).with_context(|| {
        format!(
            "failed to collect sources under {}",
            config.project_dir.display()
        )
    })?;

    let tokenizer = Tokenizer::cl100k()?;
    let rendered = blob.render();
    let chunks = tokenizer.split(&rendered, config.input_token_limit)?;
    let total_tokens = chunks.iter().map(Chunk::token_count).sum();

    info!(
        "collected {} files ({} skipped), {} tokens in {} chunks",
        blob.files.len(),
        blob.skipped.len(),
        total_tokens,
        chunks.len()
    );

    Ok(Prepared {
        blob,
        total_tokens,
        chunks,
    })
}

/// Fold the chunks through `completer` and write the final document.
pub async fn run_with(
    config: &Config,
    chunks: &[Chunk],
    completer: &dyn Completer,
    progress: &ProgressBar,
) -> Result<Accumulation> {
    let acc = accumulate(chunks, completer, |index, result| {
        if let Err(e) = result {
            progress.set_message(format!("chunk {} failed: {}", index + 1, e));
        }
        progress.inc(1);
    })
    .await;

    write_output(&config.output_path, &acc.output)?;
    Ok(acc)
}

pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    config.validate(!dry_run)?;

    print_banner(env!("CARGO_PKG_VERSION"));
    println!(
        "{}Working on {}",
        FOLDER,
        style(config.project_dir.display()).cyan()
    );

    let prepared = prepare(config)?;

    println!();
    print_stat("Files collected", style(prepared.blob.files.len()).green());
    if !prepared.blob.skipped.is_empty() {
        print_stat("Files skipped", style(prepared.blob.skipped.len()).yellow());
    }
    print_stat("Total tokens", style(prepared.total_tokens).cyan());
    print_stat(
        "Chunks",
        format!(
            "{} (max {} tokens each)",
            style(prepared.chunks.len()).cyan(),
            config.input_token_limit
        ),
    );
    println!();

    if dry_run {
        println!("{}Dry run: no requests sent.", INFO);
        return Ok(());
    }

    let completer = create_completer(config)?;

    let pb = ProgressBar::new(prepared.chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks ({elapsed}) {msg}")?
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let acc = run_with(config, &prepared.chunks, completer.as_ref(), &pb).await?;

    pb.finish_and_clear();

    println!(
        "{}Wrote {}",
        WRITING,
        style(config.output_path.display()).green()
    );
    if acc.failures.is_empty() {
        println!("\n{}Documentation complete!\n", SUCCESS);
    } else {
        print_warning(&format!(
            "{} of {} chunks failed; their content is missing from the merge",
            acc.failures.len(),
            acc.steps
        ));
        for failure in acc.failures.iter().take(10) {
            println!(
                "    - chunk {}: {}",
                failure.index + 1,
                style(&failure.error).red()
            );
        }
        if acc.failures.len() > 10 {
            println!("    ... and {} more", acc.failures.len() - 10);
        }
        if acc.output.is_empty() && acc.steps > 0 {
            print_warning("the last chunk failed, so the written document is empty");
        }
    }
    print_success(&format!("{} chunks processed", acc.steps));

    Ok(())
}
